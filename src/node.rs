//! 节点描述模块
//!
//! 向宿主声明上传节点的参数、返回值和显示信息，并定义节点输出格式。

use crate::bunny::Region;
use crate::uploader::{DEFAULT_FILENAME_PREFIX, DEFAULT_REMOTE_PATH};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 上传节点的类名
pub const UPLOAD_NODE_CLASS: &str = "BunnyCDNUploadVideo";

/// 上传节点的显示名称
pub const UPLOAD_NODE_DISPLAY_NAME: &str = "BunnyCDN Upload Video";

/// 输出名称
pub const OUTPUT_NAME: &str = "bunny_cdn_url";

/// 参数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParamType {
    /// 任意类型的句柄
    #[serde(rename = "*")]
    Any,
    #[serde(rename = "STRING")]
    String,
    /// 从固定选项中选择
    #[serde(rename = "COMBO")]
    Choice,
}

/// 单个输入参数的声明
#[derive(Debug, Clone, Serialize)]
pub struct InputParam {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: ParamType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub multiline: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<&'static str>,
}

impl InputParam {
    fn new(name: &'static str, kind: ParamType) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            multiline: false,
            choices: Vec::new(),
        }
    }

    fn string(name: &'static str, default: &'static str) -> Self {
        Self {
            default: Some(default),
            ..Self::new(name, ParamType::String)
        }
    }
}

/// 节点定义
#[derive(Debug, Clone, Serialize)]
pub struct NodeDefinition {
    pub name: &'static str,
    pub display_name: &'static str,
    pub category: &'static str,
    pub function: &'static str,
    pub output_node: bool,
    pub inputs: Vec<InputParam>,
    pub return_types: Vec<&'static str>,
    pub return_names: Vec<&'static str>,
}

/// 上传节点的定义
pub fn upload_node_definition() -> NodeDefinition {
    let region = InputParam {
        choices: Region::ALL.iter().map(|r| r.label()).collect(),
        ..InputParam::new("storage_zone_region", ParamType::Choice)
    };
    let access_key = InputParam {
        multiline: true,
        ..InputParam::string("access_key", "")
    };

    NodeDefinition {
        name: UPLOAD_NODE_CLASS,
        display_name: UPLOAD_NODE_DISPLAY_NAME,
        category: "BunnyCDN",
        function: "upload_video",
        output_node: true,
        inputs: vec![
            InputParam::new("media_file", ParamType::Any),
            InputParam::string("storage_zone_name", ""),
            access_key,
            region,
            InputParam::string("remote_path", DEFAULT_REMOTE_PATH),
            InputParam::string("remote_filename_prefix", DEFAULT_FILENAME_PREFIX),
        ],
        return_types: vec!["STRING"],
        return_names: vec![OUTPUT_NAME],
    }
}

/// 已注册的所有节点，按类名索引
pub fn node_definitions() -> BTreeMap<&'static str, NodeDefinition> {
    BTreeMap::from([(UPLOAD_NODE_CLASS, upload_node_definition())])
}

/// 界面侧通道
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeUi {
    pub bunny_cdn_url: Vec<String>,
}

/// 节点输出：`result` 为唯一的字符串输出，成功时 `ui` 携带同一个 URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<NodeUi>,
    pub result: (String,),
}

impl NodeOutput {
    pub fn from_url(url: String) -> Self {
        Self {
            ui: Some(NodeUi {
                bunny_cdn_url: vec![url.clone()],
            }),
            result: (url,),
        }
    }

    /// 失败时的输出：空字符串
    pub fn failure() -> Self {
        Self {
            ui: None,
            result: (String::new(),),
        }
    }

    pub fn url(&self) -> &str {
        &self.result.0
    }
}
