//! 配置系统
//! 从环境变量加载所有配置（前缀 PERM_，层级分隔符 __）

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// JSON 权限目录文件路径，未设置时使用内置目录
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionConfig {
    /// 是否给出移除建议
    pub include_removals: bool,
    /// 低于该置信度的建议会被丢弃
    pub min_confidence: f64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            include_removals: true,
            min_confidence: 0.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    pub suggestions: SuggestionConfig,
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        // 添加默认配置
        settings = settings
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .set_default("suggestions.include_removals", true)?
            .set_default("suggestions.min_confidence", 0.0)?;

        settings = settings.add_source(
            Environment::with_prefix("PERM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = settings.build()?.try_deserialize()?;

        // 验证配置
        config.validate()?;

        Ok(config)
    }

    /// 验证配置合法性
    fn validate(&self) -> Result<(), ConfigError> {
        // 验证日志级别
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        // 验证日志格式
        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty",
                    self.logging.format
                )))
            }
        }

        if !(0.0..=1.0).contains(&self.suggestions.min_confidence) {
            return Err(ConfigError::Message(
                "suggestions.min_confidence must be between 0.0 and 1.0".to_string(),
            ));
        }

        if let Some(path) = &self.catalog.path {
            if path.trim().is_empty() {
                return Err(ConfigError::Message("catalog.path must not be empty".to_string()));
            }
        }

        Ok(())
    }
}
