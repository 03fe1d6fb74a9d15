//! 上传流程模块
//!
//! 按固定顺序执行：解析凭据、渲染临时文件、拼接远程路径、选择区域主机、
//! 上传、清理临时文件。内部以 [`UploadResult`] 返回失败原因，
//! 只有 [`Uploader::run`] 会把失败折叠成节点的空字符串输出。

use crate::bunny::{Region, StorageClient, compose_remote_path, local_filename, public_url};
use crate::config::{Credentials, EnvLookup};
use crate::error::{UploadError, UploadResult};
use crate::node::NodeOutput;
use crate::utils::temp::TempArtifact;
use crate::video::{ContainerFormat, VideoCodec, VideoSource};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// 默认远程目录
pub const DEFAULT_REMOTE_PATH: &str = "videos/";

/// 默认文件名前缀
pub const DEFAULT_FILENAME_PREFIX: &str = "comfyui_";

/// 上传节点的字符串参数
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UploadRequest {
    pub storage_zone_name: String,
    pub access_key: String,
    pub storage_zone_region: String,
    pub remote_path: String,
    pub remote_filename_prefix: String,
}

impl Default for UploadRequest {
    fn default() -> Self {
        Self {
            storage_zone_name: String::new(),
            access_key: String::new(),
            storage_zone_region: Region::default().label().to_string(),
            remote_path: DEFAULT_REMOTE_PATH.to_string(),
            remote_filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
        }
    }
}

/// 上传成功后的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSuccess {
    /// 实际发送 PUT 请求的地址
    pub api_url: String,
    /// 规范化后的远程完整路径
    pub remote_full_path: String,
    /// 对外公开的 CDN 地址
    pub public_url: String,
}

/// BunnyCDN 视频上传器
pub struct Uploader {
    storage: StorageClient,
    env: Arc<dyn EnvLookup>,
    temp_dir: PathBuf,
}

impl Uploader {
    /// # 参数
    ///
    /// * `storage` - 存储 API 客户端。
    /// * `env` - 凭据回退使用的环境变量查询能力。
    /// * `temp_dir` - 宿主提供的临时目录。
    pub fn new(storage: StorageClient, env: Arc<dyn EnvLookup>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            env,
            temp_dir: temp_dir.into(),
        }
    }

    /// 渲染视频并上传到 BunnyCDN。
    ///
    /// 临时文件在渲染前预留，函数返回时无论成功与否都会被删除。
    ///
    /// # 参数
    ///
    /// * `video` - 要上传的视频句柄。
    /// * `request` - 节点参数。
    ///
    /// # 返回值
    ///
    /// 成功时返回上传地址和公开地址。
    ///
    /// # Errors
    ///
    /// 凭据缺失、渲染失败、传输失败或响应状态码不是 2xx 时返回对应的 [`UploadError`]。
    pub async fn upload(
        &self,
        video: &dyn VideoSource,
        request: &UploadRequest,
    ) -> UploadResult<UploadSuccess> {
        // 1. 解析凭据，此前不做任何 I/O
        let credentials = Credentials::resolve(
            &request.storage_zone_name,
            &request.access_key,
            self.env.as_ref(),
        )
        .map_err(|missing| UploadError::MissingCredentials { missing })?;

        // 2. 渲染到临时文件
        let filename = local_filename(&request.remote_filename_prefix);
        let artifact =
            TempArtifact::reserve(&self.temp_dir, &filename).map_err(UploadError::TempDir)?;

        info!("保存视频到临时文件: {}", artifact.path().display());
        video
            .save_to(artifact.path(), ContainerFormat::Mp4, VideoCodec::H264)
            .await?;

        // 3. 远程路径
        let remote_full_path = compose_remote_path(&request.remote_path, &filename);

        // 4. 区域主机
        let region = Region::from_label_or_default(&request.storage_zone_region);

        // 5. 上传
        let api_url =
            self.storage
                .upload_url(region, &credentials.storage_zone_name, &remote_full_path);
        info!(
            "上传 {} 到 BunnyCDN ({}, {})",
            artifact.path().display(),
            region,
            remote_full_path
        );
        self.storage
            .put_file(&api_url, &credentials.access_key, artifact.path())
            .await?;

        let public_url = public_url(&credentials.storage_zone_name, &remote_full_path);
        Ok(UploadSuccess {
            api_url,
            remote_full_path,
            public_url,
        })
    }

    /// 执行上传并生成节点输出，失败只记录日志并返回空字符串结果。
    pub async fn run(&self, video: &dyn VideoSource, request: &UploadRequest) -> NodeOutput {
        match self.upload(video, request).await {
            Ok(success) => {
                info!("上传成功: {}", success.public_url);
                NodeOutput::from_url(success.public_url)
            }
            Err(e) => {
                error!(kind = e.kind(), "上传到 BunnyCDN 失败: {}", e);
                NodeOutput::failure()
            }
        }
    }
}
