//! 🔧 共享库模块
//!
//! 存放各个服务都会用到的配置信息

pub mod models;

pub use models::config::{AppConfig, DatabaseConfig};
