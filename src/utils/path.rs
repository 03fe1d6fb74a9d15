/// 拼接目录和文件名，行为与 POSIX 风格的 path join 一致
///
/// - 文件名以 `/` 开头时视为绝对路径，直接返回文件名
/// - 目录为空或以 `/` 结尾时直接相连
/// - 其余情况在两者之间插入一个 `/`
///
/// # 示例
///
/// ```
/// use bunny_upload_node::utils::path::join_path;
///
/// assert_eq!(join_path("videos/", "a.mp4"), "videos/a.mp4");
/// assert_eq!(join_path("videos", "a.mp4"), "videos/a.mp4");
/// assert_eq!(join_path("", "a.mp4"), "a.mp4");
/// assert_eq!(join_path("videos", "/a.mp4"), "/a.mp4");
/// ```
pub fn join_path(base: &str, name: &str) -> String {
    if name.starts_with('/') {
        return name.to_string();
    }
    if base.is_empty() || base.ends_with('/') {
        format!("{base}{name}")
    } else {
        format!("{base}/{name}")
    }
}
