//! 权限计算引擎库
//! 提供权限目录、差异计算、校验、建议与检索

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod telemetry;

pub use catalog::Catalog;
pub use error::AppError;
pub use services::PermissionEngine;
