//! 基于角色基线的权限建议

use std::collections::HashSet;

use super::{diff_service::unique, PermissionEngine};
use crate::models::{Permission, RiskLevel, Role, Suggestion, SuggestionAction};

/// 缺失依赖的建议置信度
const DEPENDENCY_CONFIDENCE: f64 = 1.0;
/// 基线建议的最低置信度，剩余部分按覆盖的角色比例递增
const BASELINE_CONFIDENCE_FLOOR: f64 = 0.5;
const REMOVE_HIGH_CONFIDENCE: f64 = 0.6;
const REMOVE_CRITICAL_CONFIDENCE: f64 = 0.8;

impl PermissionEngine {
    /// Suggest adjustments to `current` for the given role.
    ///
    /// Unknown role names have no baseline, so only missing dependencies of
    /// held permissions are suggested. Results are ranked by confidence and
    /// are deterministic for identical inputs.
    pub fn get_suggestions<S: AsRef<str>>(&self, role: &str, current: &[S]) -> Vec<Suggestion> {
        let role = role.parse::<Role>().ok();
        let current = unique(current);
        let held: HashSet<&str> = current.iter().copied().collect();

        let mut suggested: HashSet<&str> = HashSet::new();
        let mut suggestions = Vec::new();

        // 1. 已持有权限的缺失依赖
        for &permission in &current {
            let Some(metadata) = self.catalog.metadata(permission) else {
                continue;
            };
            for dep in &metadata.dependencies {
                let dep = dep.as_str();
                if held.contains(dep) || !suggested.insert(dep) {
                    continue;
                }
                suggestions.push(Suggestion {
                    permission: Permission::from(dep),
                    reason: format!("Required by {}", metadata.label),
                    confidence: DEPENDENCY_CONFIDENCE,
                    action: SuggestionAction::Add,
                });
            }
        }

        if let Some(role) = role {
            let baseline = self.catalog.baseline(role);

            // 2. 角色基线中尚未持有的权限
            for permission in baseline {
                let id = permission.as_str();
                if held.contains(id) || !suggested.insert(id) {
                    continue;
                }
                let label = self
                    .catalog
                    .metadata(id)
                    .map(|m| m.label.as_str())
                    .unwrap_or(id);
                suggestions.push(Suggestion {
                    permission: permission.clone(),
                    reason: format!(
                        "{} is commonly granted to the {} role",
                        label,
                        role.display_name()
                    ),
                    confidence: self.baseline_confidence(id),
                    action: SuggestionAction::Add,
                });
            }

            // 3. 超出基线的高风险权限
            if self.suggestions.include_removals {
                let baseline_set: HashSet<&str> = baseline.iter().map(Permission::as_str).collect();
                let required_by_held: HashSet<&str> = current
                    .iter()
                    .filter_map(|p| self.catalog.metadata(p))
                    .flat_map(|m| m.dependencies.iter().map(Permission::as_str))
                    .collect();

                for &permission in &current {
                    if baseline_set.contains(permission) || required_by_held.contains(permission) {
                        continue;
                    }
                    let Some(metadata) = self.catalog.metadata(permission) else {
                        continue;
                    };
                    let confidence = match metadata.risk {
                        RiskLevel::Critical => REMOVE_CRITICAL_CONFIDENCE,
                        RiskLevel::High => REMOVE_HIGH_CONFIDENCE,
                        RiskLevel::Low | RiskLevel::Medium => continue,
                    };
                    suggestions.push(Suggestion {
                        permission: Permission::from(permission),
                        reason: format!(
                            "{} is not typical for the {} role and carries {} risk",
                            metadata.label,
                            role.display_name(),
                            metadata.risk
                        ),
                        confidence,
                        action: SuggestionAction::Remove,
                    });
                }
            }
        }

        let min_confidence = self.suggestions.min_confidence;
        suggestions.retain(|s| s.confidence >= min_confidence);
        // 稳定排序，同置信度保持生成顺序
        suggestions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        metrics::counter!("permission_suggestions_total").increment(suggestions.len() as u64);
        tracing::debug!(
            role = role.map(|r| r.as_str()).unwrap_or("unknown"),
            held = current.len(),
            suggestions = suggestions.len(),
            "Permission suggestions generated"
        );

        suggestions
    }

    /// 覆盖角色越多的权限越"基础"，置信度越高
    fn baseline_confidence(&self, permission: &str) -> f64 {
        let share = self.catalog.roles_granting(permission) as f64 / Role::ALL.len() as f64;
        (BASELINE_CONFIDENCE_FLOOR + (1.0 - BASELINE_CONFIDENCE_FLOOR) * share).clamp(0.0, 1.0)
    }
}
