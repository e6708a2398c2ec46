//! 统一错误模型
//! 引擎运算本身不会失败，错误只来自配置、权限目录加载以及角色写入前的校验

use serde::Serialize;
use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub fn catalog(msg: impl Into<String>) -> Self {
        AppError::Catalog(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// 获取错误码（沿用 HTTP 状态码语义，供上层 API 直接使用）
    pub fn code(&self) -> u16 {
        match self {
            AppError::Validation(_) | AppError::Catalog(_) => 400,
            AppError::Config(_) | AppError::Io(_) | AppError::Serialization(_) => 500,
        }
    }

    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Catalog(msg) => format!("Invalid permission catalog: {}", msg),
            AppError::Config(_) => "Configuration error".to_string(),
            AppError::Io(_) => "Failed to read permission catalog".to_string(),
            AppError::Serialization(_) => "Malformed permission catalog".to_string(),
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorDetail {
                code: self.code(),
                message: self.user_message(),
            },
        }
    }
}

/// 错误响应 DTO
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: u16,
    pub message: String,
}

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

/// 权限定义字段校验失败
impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Catalog(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
