use crate::utils::path::join_path;

/// 渲染输出的容器扩展名
pub const VIDEO_EXTENSION: &str = "mp4";

/// 根据前缀生成文件名。
///
/// 前缀本身就是完整的文件名主体，不会附加任何唯一标识，
/// 相同前缀的两次上传会写入同一个远程对象。
///
/// # 示例
///
/// ```
/// use bunny_upload_node::bunny::local_filename;
///
/// assert_eq!(local_filename("clip1"), "clip1.mp4");
/// assert_eq!(local_filename(""), ".mp4");
/// ```
pub fn local_filename(prefix: &str) -> String {
    format!("{prefix}.{VIDEO_EXTENSION}")
}

/// 把反斜杠替换为正斜杠后拼接远程目录和文件名。
///
/// 目录末尾的反斜杠与正斜杠等价，不会产生双斜杠。
///
/// # 参数
///
/// * `remote_path` - 远程目录，例如 `videos/`。
/// * `filename` - 文件名。
///
/// # 返回值
///
/// 只包含正斜杠的远程完整路径
///
/// # 示例
///
/// ```
/// use bunny_upload_node::bunny::compose_remote_path;
///
/// assert_eq!(compose_remote_path("videos/", "clip1.mp4"), "videos/clip1.mp4");
/// assert_eq!(compose_remote_path("videos\\sub", "clip1.mp4"), "videos/sub/clip1.mp4");
/// assert_eq!(compose_remote_path("videos\\sub\\", "clip1.mp4"), "videos/sub/clip1.mp4");
/// ```
pub fn compose_remote_path(remote_path: &str, filename: &str) -> String {
    join_path(&remote_path.replace('\\', "/"), &filename.replace('\\', "/"))
}

/// 存储 API 的上传地址：`{base}/{存储区}/{远程路径}`
pub fn api_url(base: &str, storage_zone_name: &str, remote_full_path: &str) -> String {
    format!("{base}/{storage_zone_name}/{remote_full_path}")
}

/// 上传成功后对外公开的 CDN 地址
pub fn public_url(storage_zone_name: &str, remote_full_path: &str) -> String {
    format!("https://{storage_zone_name}.b-cdn.net/{remote_full_path}")
}
