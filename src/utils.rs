//! 工具函数模块
//!
//! 此模块包含了项目中使用的各种工具函数：
//! - 路径拼接工具
//! - 临时文件的作用域清理

pub mod path;
pub mod temp;
