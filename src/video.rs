//! 视频句柄模块
//!
//! 节点接收的视频是一个不透明句柄，唯一的能力是“按指定容器和编码渲染到文件”。
//! 生产环境下由 ffmpeg 完成渲染。

use crate::error::RenderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// 输出容器格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    Mp4,
}

impl ContainerFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ContainerFormat::Mp4 => "mp4",
        }
    }
}

/// 输出视频编码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCodec {
    H264,
}

impl VideoCodec {
    pub fn as_str(self) -> &'static str {
        match self {
            VideoCodec::H264 => "h264",
        }
    }

    /// ffmpeg 中对应的编码器名称
    pub fn ffmpeg_encoder(self) -> &'static str {
        match self {
            VideoCodec::H264 => "libx264",
        }
    }
}

/// 可渲染到本地文件的视频句柄
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// 把视频以指定容器和编码写入 `path`。
    ///
    /// # Errors
    ///
    /// 渲染失败时返回 [`RenderError`]，此时不保证 `path` 不存在。
    async fn save_to(
        &self,
        path: &Path,
        format: ContainerFormat,
        codec: VideoCodec,
    ) -> Result<(), RenderError>;
}

/// 宿主传入的媒体引用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    /// 本地源视频文件
    pub path: PathBuf,
}

/// 把媒体引用转换为视频句柄
pub trait MediaLoader: Send + Sync {
    fn open(&self, media: &MediaRef) -> Box<dyn VideoSource>;
}

/// 基于 ffmpeg 的媒体加载器
#[derive(Debug, Clone)]
pub struct FfmpegLoader {
    program: String,
}

impl FfmpegLoader {
    /// # 参数
    ///
    /// * `program` - ffmpeg 可执行文件名或路径。
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl MediaLoader for FfmpegLoader {
    fn open(&self, media: &MediaRef) -> Box<dyn VideoSource> {
        Box::new(FfmpegVideo::new(self.program.clone(), media.path.clone()))
    }
}

/// 由本地源文件经 ffmpeg 转码得到的视频句柄
#[derive(Debug, Clone)]
pub struct FfmpegVideo {
    program: String,
    input: PathBuf,
}

impl FfmpegVideo {
    pub fn new(program: impl Into<String>, input: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            input: input.into(),
        }
    }
}

/// 构建 ffmpeg 转码参数
fn ffmpeg_args(
    input: &Path,
    output: &Path,
    format: ContainerFormat,
    codec: VideoCodec,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-y", "-loglevel", "error", "-i"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(input.as_os_str().to_owned());
    args.extend(
        [
            "-c:v",
            codec.ffmpeg_encoder(),
            "-pix_fmt",
            "yuv420p",
            "-c:a",
            "aac",
            "-f",
            format.as_str(),
        ]
        .into_iter()
        .map(OsString::from),
    );
    args.push(output.as_os_str().to_owned());
    args
}

#[async_trait]
impl VideoSource for FfmpegVideo {
    async fn save_to(
        &self,
        path: &Path,
        format: ContainerFormat,
        codec: VideoCodec,
    ) -> Result<(), RenderError> {
        if !tokio::fs::try_exists(&self.input).await? {
            return Err(RenderError::SourceNotFound(self.input.clone()));
        }

        let args = ffmpeg_args(&self.input, path, format, codec);
        debug!("{} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| RenderError::FfmpegLaunch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RenderError::FfmpegFailed {
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if !tokio::fs::try_exists(path).await? {
            return Err(RenderError::MissingOutput(path.to_path_buf()));
        }

        info!(
            "已渲染 {} -> {} ({}/{})",
            self.input.display(),
            path.display(),
            format.as_str(),
            codec.as_str()
        );
        Ok(())
    }
}
