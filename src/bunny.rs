//! BunnyCDN 存储模块
//!
//! 该模块负责与 BunnyCDN 存储 API 的交互，包括区域选择、路径拼接和文件上传。

// 声明子模块
pub mod client;
pub mod paths;
pub mod region;

// 重新导出常用的类型和函数
pub use client::StorageClient;
pub use paths::{compose_remote_path, local_filename, public_url};
pub use region::Region;
