use crate::AppState;
use crate::node::{NodeDefinition, NodeOutput, UPLOAD_NODE_CLASS, node_definitions};
use crate::uploader::UploadRequest;
use crate::video::MediaRef;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::collections::BTreeMap;

/// 运行节点的请求体
///
/// `media_file` 之外的字段与节点的字符串参数一致，缺省时使用参数声明中的默认值。
#[derive(Debug, Deserialize)]
pub struct RunNodeRequest {
    pub media_file: MediaRef,
    #[serde(flatten)]
    pub params: UploadRequest,
}

/// 列出所有已注册节点的定义
///
/// # 请求方法
///
/// GET /nodes
pub async fn handle_list_nodes() -> Json<BTreeMap<&'static str, NodeDefinition>> {
    Json(node_definitions())
}

/// 运行指定节点
///
/// # 请求方法
///
/// POST /nodes/{class_name}/run
///
/// # 返回值
///
/// * `Ok(Json<NodeOutput>)` - 节点输出；上传失败时 `result` 为空字符串，状态码仍为 200
/// * `Err((StatusCode, String))` - 节点类名不存在时返回 404
pub async fn handle_run_node(
    State(state): State<AppState>,
    Path(class_name): Path<String>,
    Json(request): Json<RunNodeRequest>,
) -> Result<Json<NodeOutput>, (StatusCode, String)> {
    if class_name != UPLOAD_NODE_CLASS {
        return Err((StatusCode::NOT_FOUND, format!("Unknown node: {class_name}")));
    }

    let video = state.loader.open(&request.media_file);
    let output = state.uploader.run(video.as_ref(), &request.params).await;
    Ok(Json(output))
}
