//! BunnyCDN 视频上传节点
//!
//! 这是一个供节点式媒体生成宿主调用的上传节点，主要功能包括：
//! - 把宿主传入的视频渲染为 mp4/h264 临时文件
//! - 通过 HTTPS PUT 上传到 BunnyCDN 存储区
//! - 返回公开的 CDN 地址，并保证临时文件被清理

pub mod bunny;
pub mod config;
pub mod error;
pub mod handlers;
pub mod node;
pub mod uploader;
pub mod utils;
pub mod video;

use axum::routing::{get, post};
use config::{EnvLookup, Settings};
use reqwest::Client;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use uploader::Uploader;
use video::{FfmpegLoader, MediaLoader};

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub uploader: Arc<Uploader>,
    pub loader: Arc<dyn MediaLoader>,
}

impl AppState {
    /// 根据进程设置构建应用状态
    ///
    /// # 参数
    ///
    /// * `settings` - 进程级设置。
    /// * `env` - 凭据回退使用的环境变量查询能力。
    pub fn from_settings(settings: &Settings, env: Arc<dyn EnvLookup>) -> Self {
        let storage = bunny::StorageClient::new(Client::new(), settings.storage_endpoint.clone());
        Self {
            uploader: Arc::new(Uploader::new(storage, env, settings.temp_dir.clone())),
            loader: Arc::new(FfmpegLoader::new(settings.ffmpeg.clone())),
        }
    }
}

/// 创建并配置Axum应用程序
///
/// # Returns
///
/// 返回配置好的Axum Router实例
pub fn app(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/nodes", get(handlers::handle_list_nodes))
        .route("/nodes/{class_name}/run", post(handlers::handle_run_node))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
