//! Permission domain models

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Permission identifier, e.g. `analytics.view`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(String);

impl Permission {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// `HashSet<Permission>` 可以直接用 `&str` 查询
impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Permission {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Permission {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for Permission {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Permission {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Permission category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionCategory {
    Analytics,
    Users,
    Roles,
    Permissions,
    Teams,
    Billing,
    Integrations,
    Audit,
    System,
}

impl PermissionCategory {
    pub const ALL: [PermissionCategory; 9] = [
        PermissionCategory::Analytics,
        PermissionCategory::Users,
        PermissionCategory::Roles,
        PermissionCategory::Permissions,
        PermissionCategory::Teams,
        PermissionCategory::Billing,
        PermissionCategory::Integrations,
        PermissionCategory::Audit,
        PermissionCategory::System,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionCategory::Analytics => "ANALYTICS",
            PermissionCategory::Users => "USERS",
            PermissionCategory::Roles => "ROLES",
            PermissionCategory::Permissions => "PERMISSIONS",
            PermissionCategory::Teams => "TEAMS",
            PermissionCategory::Billing => "BILLING",
            PermissionCategory::Integrations => "INTEGRATIONS",
            PermissionCategory::Audit => "AUDIT",
            PermissionCategory::System => "SYSTEM",
        }
    }
}

impl fmt::Display for PermissionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a category name is not part of the closed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown permission category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for PermissionCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        PermissionCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Risk level, ordered LOW < MEDIUM < HIGH < CRITICAL
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum RiskLevel {
    #[default]
    Low = 0,
    Medium = 1,
    High = 2,
    Critical = 3,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog metadata for a single permission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PermissionMetadata {
    pub category: PermissionCategory,
    pub risk: RiskLevel,
    pub label: String,
    pub description: String,
    /// Permissions that must be granted alongside this one
    pub dependencies: Vec<Permission>,
    /// Permissions that should not be granted alongside this one (advisory)
    pub conflicts: Vec<Permission>,
    pub tags: Vec<String>,
}

impl PermissionMetadata {
    pub fn new(
        category: PermissionCategory,
        risk: RiskLevel,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category,
            risk,
            label: label.into(),
            description: description.into(),
            dependencies: Vec::new(),
            conflicts: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn depends_on<I, P>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.dependencies.extend(dependencies.into_iter().map(Into::into));
        self
    }

    pub fn conflicts_with<I, P>(mut self, conflicts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.conflicts.extend(conflicts.into_iter().map(Into::into));
        self
    }

    pub fn tagged<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// 标签、名称或描述是否包含查询（调用方负责传入小写查询）
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.label.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}
