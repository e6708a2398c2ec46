//! Diff, validation and suggestion result models
//!
//! 这些值每次调用都重新构建，由调用方独占，字段名与管理后台 JSON 保持一致

use serde::Serialize;

use super::permission::{Permission, RiskLevel};

/// Set difference between a current and a target permission collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PermissionDiff {
    pub added: Vec<Permission>,
    pub removed: Vec<Permission>,
    pub unchanged: Vec<Permission>,
    /// Distinct permissions across current ∪ target
    pub total: usize,
}

impl PermissionDiff {
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationErrorKind {
    MissingDependency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationWarningKind {
    Conflict,
}

/// A hard rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    #[serde(rename = "type")]
    pub kind: ValidationErrorKind,
    pub permission: Permission,
    /// The missing dependency
    pub detail: Permission,
}

/// An advisory finding, never affects validity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    #[serde(rename = "type")]
    pub kind: ValidationWarningKind,
    pub permission: Permission,
    /// The conflicting permission
    pub detail: Permission,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub risk_level: RiskLevel,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            risk_level: RiskLevel::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionAction {
    Add,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub permission: Permission,
    pub reason: String,
    /// Always within [0, 1]
    pub confidence: f64,
    pub action: SuggestionAction,
}
