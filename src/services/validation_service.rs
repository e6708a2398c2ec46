//! 权限集合校验：依赖、冲突与风险等级

use std::collections::{HashSet, VecDeque};

use super::{diff_service::unique, PermissionEngine};
use crate::error::{AppError, Result};
use crate::models::{
    Permission, RiskLevel, ValidationError, ValidationErrorKind, ValidationResult,
    ValidationWarning, ValidationWarningKind,
};

impl PermissionEngine {
    /// Validate a candidate permission set.
    ///
    /// Dependencies are checked one hop deep. Conflicts are reported once per
    /// unordered pair, attributed to the first permission in input order that
    /// declares it. Ids unknown to the catalog are skipped and never fail
    /// validation.
    pub fn validate<S: AsRef<str>>(&self, permissions: &[S]) -> ValidationResult {
        let permissions = unique(permissions);
        let present: HashSet<&str> = permissions.iter().copied().collect();

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut reported_pairs: HashSet<(&str, &str)> = HashSet::new();
        let mut risk_level = RiskLevel::Low;

        for &permission in &permissions {
            let Some(metadata) = self.catalog.metadata(permission) else {
                continue;
            };

            risk_level = risk_level.max(metadata.risk);

            for dep in &metadata.dependencies {
                if !present.contains(dep.as_str()) {
                    errors.push(ValidationError {
                        kind: ValidationErrorKind::MissingDependency,
                        permission: Permission::from(permission),
                        detail: dep.clone(),
                    });
                }
            }

            for conflict in &metadata.conflicts {
                let other = conflict.as_str();
                if !present.contains(other) {
                    continue;
                }
                let pair = if permission < other {
                    (permission, other)
                } else {
                    (other, permission)
                };
                if reported_pairs.insert(pair) {
                    warnings.push(ValidationWarning {
                        kind: ValidationWarningKind::Conflict,
                        permission: Permission::from(permission),
                        detail: conflict.clone(),
                    });
                }
            }
        }

        let is_valid = errors.is_empty();

        metrics::counter!(
            "permission_validations_total",
            "outcome" => if is_valid { "valid" } else { "invalid" }
        )
        .increment(1);

        tracing::debug!(
            permissions = permissions.len(),
            errors = errors.len(),
            warnings = warnings.len(),
            risk = %risk_level,
            "Permission set validated"
        );

        ValidationResult {
            is_valid,
            errors,
            warnings,
            risk_level,
        }
    }

    /// Whether every direct dependency of `permission` is in `current`.
    /// Unknown permissions have no dependencies and are always grantable.
    pub fn can_grant_permission<S: AsRef<str>>(&self, permission: &str, current: &[S]) -> bool {
        let Some(metadata) = self.catalog.metadata(permission) else {
            return true;
        };

        let held: HashSet<&str> = current.iter().map(AsRef::as_ref).collect();
        metadata
            .dependencies
            .iter()
            .all(|dep| held.contains(dep.as_str()))
    }

    /// 角色写入前的校验关口：存在缺失依赖时拒绝
    pub fn require_valid<S: AsRef<str>>(&self, permissions: &[S]) -> Result<ValidationResult> {
        let result = self.validate(permissions);

        if !result.is_valid {
            let missing: Vec<String> = result
                .errors
                .iter()
                .map(|e| format!("{} requires {}", e.permission, e.detail))
                .collect();

            tracing::warn!(
                errors = result.errors.len(),
                risk = %result.risk_level,
                "Permission set rejected"
            );

            return Err(AppError::validation(format!(
                "Missing permission dependencies: {}",
                missing.join(", ")
            )));
        }

        Ok(result)
    }

    /// Transitive dependencies of a permission, nearest first.
    /// Cycles are tolerated; the permission itself is never included.
    pub fn dependency_closure(&self, permission: &str) -> Vec<Permission> {
        let mut closure = Vec::new();
        let mut visited: HashSet<&str> = HashSet::from([permission]);
        let mut queue: VecDeque<&str> = VecDeque::from([permission]);

        while let Some(current) = queue.pop_front() {
            let Some(metadata) = self.catalog.metadata(current) else {
                continue;
            };
            for dep in &metadata.dependencies {
                if visited.insert(dep.as_str()) {
                    closure.push(dep.clone());
                    queue.push_back(dep.as_str());
                }
            }
        }

        closure
    }
}
