use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{info, warn};

/// 单次上传使用的本地临时文件。
///
/// 文件位于宿主临时目录下一个独立的子目录中，
/// 守卫被释放时（无论成功、失败还是提前返回）文件和子目录都会被删除。
#[derive(Debug)]
pub struct TempArtifact {
    // 先删除文件再由 TempDir 删除目录
    path: PathBuf,
    dir: TempDir,
}

impl TempArtifact {
    /// 在临时目录下为指定文件名预留路径，此时文件本身尚未创建。
    ///
    /// # 参数
    ///
    /// * `temp_root` - 宿主提供的临时目录，不存在时会被创建。
    /// * `filename` - 文件名，路径分隔符会被替换为 `_`。
    pub fn reserve(temp_root: &Path, filename: &str) -> io::Result<Self> {
        std::fs::create_dir_all(temp_root)?;
        let dir = tempfile::Builder::new()
            .prefix("bunny-upload-")
            .tempdir_in(temp_root)?;
        let path = dir.path().join(local_basename(filename));
        Ok(Self { path, dir })
    }

    /// 临时文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        if self.path.exists() {
            info!("清理临时文件: {}", self.path.display());
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!("删除临时文件 {} 失败: {}", self.path.display(), e);
            }
        }
    }
}

/// 本地文件名只保留单一路径段
fn local_basename(filename: &str) -> String {
    filename.replace(['/', '\\'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact_dir(artifact: &TempArtifact) -> PathBuf {
        artifact.path().parent().unwrap().to_path_buf()
    }

    #[test]
    fn test_file_removed_on_drop() {
        let root = tempfile::tempdir().unwrap();
        let artifact = TempArtifact::reserve(root.path(), "clip.mp4").unwrap();
        std::fs::write(artifact.path(), b"video").unwrap();

        let path = artifact.path().to_path_buf();
        let dir = artifact_dir(&artifact);
        assert!(path.exists());

        drop(artifact);
        assert!(!path.exists());
        assert!(!dir.exists());
    }

    #[test]
    fn test_drop_without_file_is_quiet() {
        let root = tempfile::tempdir().unwrap();
        let artifact = TempArtifact::reserve(root.path(), "never-written.mp4").unwrap();
        let dir = artifact_dir(&artifact);

        drop(artifact);
        assert!(!dir.exists());
    }

    #[test]
    fn test_same_filename_gets_distinct_paths() {
        let root = tempfile::tempdir().unwrap();
        let first = TempArtifact::reserve(root.path(), "comfyui_.mp4").unwrap();
        let second = TempArtifact::reserve(root.path(), "comfyui_.mp4").unwrap();

        assert_ne!(first.path(), second.path());
        assert_eq!(first.path().file_name(), second.path().file_name());
    }

    #[test]
    fn test_separators_stay_inside_artifact_dir() {
        let root = tempfile::tempdir().unwrap();
        let artifact = TempArtifact::reserve(root.path(), "/etc/clip.mp4").unwrap();

        assert!(artifact.path().starts_with(artifact_dir(&artifact)));
        assert_eq!(
            artifact.path().file_name().and_then(|n| n.to_str()),
            Some("_etc_clip.mp4")
        );
    }

    #[test]
    fn test_missing_temp_root_is_created() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("host").join("temp");
        let artifact = TempArtifact::reserve(&nested, "clip.mp4").unwrap();
        assert!(artifact_dir(&artifact).starts_with(&nested));
    }
}
