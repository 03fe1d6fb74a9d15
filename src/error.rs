//! 错误类型模块
//!
//! 上传流程中每一类失败都有对应的变体，调用方可以据此区分失败原因，
//! 只有节点输出层才会把它们折叠成空字符串。

use http::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// 视频渲染到本地文件时的错误
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Source video not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Failed to launch ffmpeg `{program}`: {source}")]
    FfmpegLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("ffmpeg exited with {exit_code:?}: {stderr}")]
    FfmpegFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Render produced no output file: {0}")]
    MissingOutput(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 上传结果类型
pub type UploadResult<T> = Result<T, UploadError>;

/// 上传流程的错误分类
#[derive(Debug, Error)]
pub enum UploadError {
    /// 参数和环境变量中都没有提供凭据
    #[error("Storage zone name or access key is not defined (missing: {missing})")]
    MissingCredentials { missing: &'static str },

    /// 无法准备本地临时目录
    #[error("Failed to prepare temporary directory: {0}")]
    TempDir(#[source] std::io::Error),

    #[error("Failed to save video to temporary file: {0}")]
    Render(#[from] RenderError),

    /// 读取本地文件失败，上传请求尚未发出
    #[error("Failed to read temporary file {path}: {source}")]
    LocalFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Transport error while uploading: {0}")]
    Transfer(#[from] reqwest::Error),

    #[error("Storage API responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl UploadError {
    /// 失败原因的简短标签，用于日志字段
    pub fn kind(&self) -> &'static str {
        match self {
            UploadError::MissingCredentials { .. } => "configuration",
            UploadError::TempDir(_) | UploadError::Render(_) => "render",
            UploadError::LocalFile { .. } | UploadError::Transfer(_) | UploadError::Status { .. } => {
                "transfer"
            }
        }
    }
}
