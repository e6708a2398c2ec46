//! 权限计算引擎
//!
//! 纯内存、无副作用：所有运算只依赖注入的只读目录和调用参数，
//! 可以在多个线程中同时调用。具体运算分布在同目录的 `*_service.rs` 中。

use std::sync::Arc;

use crate::catalog::{self, Catalog};
use crate::config::{AppConfig, SuggestionConfig};
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct PermissionEngine {
    pub(super) catalog: Arc<Catalog>,
    pub(super) suggestions: SuggestionConfig,
}

impl PermissionEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            suggestions: SuggestionConfig::default(),
        }
    }

    /// Engine over the process-wide built-in catalog
    pub fn builtin() -> Self {
        Self::new(catalog::builtin())
    }

    /// 按配置选择目录：设置了 `catalog.path` 时从文件加载，否则使用内置目录
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let catalog = match &config.catalog.path {
            Some(path) => Arc::new(Catalog::from_path(path)?),
            None => catalog::builtin(),
        };

        Ok(Self::new(catalog).with_suggestion_config(config.suggestions.clone()))
    }

    pub fn with_suggestion_config(mut self, suggestions: SuggestionConfig) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl Default for PermissionEngine {
    fn default() -> Self {
        Self::builtin()
    }
}
