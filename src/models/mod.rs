//! 数据模型模块
//! 权限、角色以及计算结果（差异、校验、建议）

pub mod permission;
pub mod role;
pub mod validation;

pub use permission::{Permission, PermissionCategory, PermissionMetadata, RiskLevel};
pub use role::Role;
pub use validation::{
    PermissionDiff, Suggestion, SuggestionAction, ValidationError, ValidationErrorKind,
    ValidationResult, ValidationWarning, ValidationWarningKind,
};
