//! HTTP请求处理模块
//!
//! 宿主通过这些接口获取节点定义并运行节点。

pub mod nodes;

// 重新导出主要的公共接口
pub use nodes::{handle_list_nodes, handle_run_node};
