//! 权限目录
//!
//! 权限 → 元数据的静态映射，以及角色基线表。目录通过 [`CatalogBuilder`]
//! 构建后即冻结，以 `Arc<Catalog>` 在线程间共享，任何运算都不会修改它。

mod builtin;
mod loader;

pub use builtin::builtin;
pub use loader::{CatalogDocument, PermissionDefinition};

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::error::{AppError, Result};
use crate::models::{Permission, PermissionCategory, PermissionMetadata, Role};

/// One catalog row
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub permission: Permission,
    pub metadata: PermissionMetadata,
}

/// Immutable permission catalog with role baselines
#[derive(Debug, Clone)]
pub struct Catalog {
    /// 定义顺序
    entries: Vec<CatalogEntry>,
    index: HashMap<Permission, usize>,
    baselines: HashMap<Role, Vec<Permission>>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, permission: &str) -> bool {
        self.index.contains_key(permission)
    }

    pub fn entry(&self, permission: &str) -> Option<&CatalogEntry> {
        self.index.get(permission).map(|&i| &self.entries[i])
    }

    /// Metadata for a permission; `None` for ids outside the catalog
    pub fn metadata(&self, permission: &str) -> Option<&PermissionMetadata> {
        self.entry(permission).map(|e| &e.metadata)
    }

    /// Entries in definition order
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn permissions(&self) -> impl Iterator<Item = &Permission> {
        self.entries.iter().map(|e| &e.permission)
    }

    pub fn by_category(&self, category: PermissionCategory) -> impl Iterator<Item = &Permission> {
        self.entries
            .iter()
            .filter(move |e| e.metadata.category == category)
            .map(|e| &e.permission)
    }

    /// Baseline permission set for a role; empty when the catalog defines none
    pub fn baseline(&self, role: Role) -> &[Permission] {
        self.baselines.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 包含该权限的角色基线数量
    pub fn roles_granting(&self, permission: &str) -> usize {
        Role::ALL
            .iter()
            .filter(|role| self.baseline(**role).iter().any(|p| p == permission))
            .count()
    }
}

/// Builder that checks catalog consistency before freezing it
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: Vec<CatalogEntry>,
    baselines: Vec<(Role, Vec<Permission>)>,
}

impl CatalogBuilder {
    pub fn permission(mut self, id: impl Into<Permission>, metadata: PermissionMetadata) -> Self {
        self.entries.push(CatalogEntry {
            permission: id.into(),
            metadata,
        });
        self
    }

    /// Ids added so far, in definition order
    pub fn permission_ids(&self) -> Vec<Permission> {
        self.entries.iter().map(|e| e.permission.clone()).collect()
    }

    /// Set the baseline for a role, replacing any earlier one
    pub fn role_baseline<I, P>(mut self, role: Role, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        let permissions: Vec<Permission> = permissions.into_iter().map(Into::into).collect();
        self.baselines.retain(|(r, _)| *r != role);
        self.baselines.push((role, permissions));
        self
    }

    pub fn build(mut self) -> Result<Catalog> {
        for entry in &mut self.entries {
            dedup_in_order(&mut entry.metadata.dependencies);
            dedup_in_order(&mut entry.metadata.conflicts);
            dedup_in_order(&mut entry.metadata.tags);
        }

        let mut index = HashMap::with_capacity(self.entries.len());
        for (i, entry) in self.entries.iter().enumerate() {
            if index.insert(entry.permission.clone(), i).is_some() {
                return Err(AppError::catalog(format!(
                    "duplicate permission: {}",
                    entry.permission
                )));
            }
        }

        for entry in &self.entries {
            let id = &entry.permission;
            for dep in &entry.metadata.dependencies {
                if dep == id {
                    return Err(AppError::catalog(format!("{} depends on itself", id)));
                }
                if !index.contains_key(dep) {
                    return Err(AppError::catalog(format!(
                        "{} depends on unknown permission {}",
                        id, dep
                    )));
                }
            }
            for conflict in &entry.metadata.conflicts {
                if conflict == id {
                    return Err(AppError::catalog(format!("{} conflicts with itself", id)));
                }
                if !index.contains_key(conflict) {
                    return Err(AppError::catalog(format!(
                        "{} conflicts with unknown permission {}",
                        id, conflict
                    )));
                }
            }
        }

        let mut baselines = HashMap::new();
        for (role, permissions) in self.baselines {
            let mut seen = HashSet::new();
            let mut deduped = Vec::with_capacity(permissions.len());
            for permission in permissions {
                if !index.contains_key(&permission) {
                    return Err(AppError::catalog(format!(
                        "baseline for {} names unknown permission {}",
                        role, permission
                    )));
                }
                if seen.insert(permission.clone()) {
                    deduped.push(permission);
                }
            }
            baselines.insert(role, deduped);
        }

        check_hierarchy(&baselines)?;

        Ok(Catalog {
            entries: self.entries,
            index,
            baselines,
        })
    }
}

/// 保留首次出现，去掉重复项
fn dedup_in_order<T: Eq + Hash + Clone>(items: &mut Vec<T>) {
    let mut seen = HashSet::with_capacity(items.len());
    items.retain(|item| seen.insert(item.clone()));
}

/// 已定义基线的角色之间必须满足 CLIENT ⊂ TEAM_MEMBER ⊂ TEAM_LEAD ⊂ ADMIN == SUPER_ADMIN
fn check_hierarchy(baselines: &HashMap<Role, Vec<Permission>>) -> Result<()> {
    let mut previous: Option<(Role, HashSet<&Permission>)> = None;

    for role in Role::ALL {
        let Some(permissions) = baselines.get(&role) else {
            continue;
        };
        let current: HashSet<&Permission> = permissions.iter().collect();

        if let Some((lower, lower_set)) = &previous {
            if let Some(missing) = lower_set.iter().find(|p| !current.contains(*p)) {
                return Err(AppError::catalog(format!(
                    "role hierarchy violated: {} grants {} but {} does not",
                    lower, missing, role
                )));
            }

            if *lower == Role::Admin && role == Role::SuperAdmin {
                if let Some(extra) = current.iter().find(|p| !lower_set.contains(*p)) {
                    return Err(AppError::catalog(format!(
                        "role hierarchy violated: {} grants {} but {} does not",
                        role, extra, lower
                    )));
                }
            } else if current.len() == lower_set.len() {
                return Err(AppError::catalog(format!(
                    "role hierarchy violated: {} grants nothing beyond {}",
                    role, lower
                )));
            }
        }
        previous = Some((role, current));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskLevel;

    fn meta(category: PermissionCategory) -> PermissionMetadata {
        PermissionMetadata::new(category, RiskLevel::Low, "label", "description")
    }

    #[test]
    fn test_build_rejects_duplicates() {
        let result = Catalog::builder()
            .permission("a.view", meta(PermissionCategory::Analytics))
            .permission("a.view", meta(PermissionCategory::Analytics))
            .build();
        assert!(matches!(result, Err(AppError::Catalog(_))));
    }

    #[test]
    fn test_build_rejects_unknown_dependency() {
        let result = Catalog::builder()
            .permission("a.edit", meta(PermissionCategory::Analytics).depends_on(["a.view"]))
            .build();
        assert!(matches!(result, Err(AppError::Catalog(_))));
    }

    #[test]
    fn test_build_rejects_self_conflict() {
        let result = Catalog::builder()
            .permission("a.view", meta(PermissionCategory::Analytics).conflicts_with(["a.view"]))
            .build();
        assert!(matches!(result, Err(AppError::Catalog(_))));
    }

    #[test]
    fn test_build_rejects_non_monotonic_baselines() {
        let result = Catalog::builder()
            .permission("a.view", meta(PermissionCategory::Analytics))
            .permission("a.edit", meta(PermissionCategory::Analytics))
            .role_baseline(Role::Client, ["a.view", "a.edit"])
            .role_baseline(Role::Admin, ["a.view"])
            .build();
        assert!(matches!(result, Err(AppError::Catalog(_))));
    }

    #[test]
    fn test_build_rejects_equal_adjacent_baselines() {
        let result = Catalog::builder()
            .permission("a.view", meta(PermissionCategory::Analytics))
            .permission("a.edit", meta(PermissionCategory::Analytics))
            .role_baseline(Role::Client, ["a.view"])
            .role_baseline(Role::TeamMember, ["a.view"])
            .role_baseline(Role::Admin, ["a.view", "a.edit"])
            .build();
        assert!(matches!(result, Err(AppError::Catalog(_))));
    }

    #[test]
    fn test_build_rejects_super_admin_beyond_admin() {
        let result = Catalog::builder()
            .permission("a.view", meta(PermissionCategory::Analytics))
            .permission("a.edit", meta(PermissionCategory::Analytics))
            .role_baseline(Role::Admin, ["a.view"])
            .role_baseline(Role::SuperAdmin, ["a.view", "a.edit"])
            .build();
        assert!(matches!(result, Err(AppError::Catalog(_))));

        let catalog = Catalog::builder()
            .permission("a.view", meta(PermissionCategory::Analytics))
            .role_baseline(Role::Admin, ["a.view"])
            .role_baseline(Role::SuperAdmin, ["a.view"])
            .build()
            .unwrap();
        assert_eq!(catalog.baseline(Role::Admin), catalog.baseline(Role::SuperAdmin));
    }

    #[test]
    fn test_build_dedups_metadata_lists() {
        let catalog = Catalog::builder()
            .permission("a.view", meta(PermissionCategory::Analytics))
            .permission("b.view", meta(PermissionCategory::Analytics))
            .permission(
                "a.edit",
                meta(PermissionCategory::Analytics)
                    .depends_on(["a.view", "a.view"])
                    .conflicts_with(["b.view", "b.view"])
                    .tagged(["csv", "csv", "bulk"]),
            )
            .build()
            .unwrap();

        let metadata = catalog.metadata("a.edit").unwrap();
        assert_eq!(metadata.dependencies, vec![Permission::from("a.view")]);
        assert_eq!(metadata.conflicts, vec![Permission::from("b.view")]);
        assert_eq!(metadata.tags, vec!["csv".to_string(), "bulk".to_string()]);
    }

    #[test]
    fn test_baseline_dedup_and_undefined_role() {
        let catalog = Catalog::builder()
            .permission("a.view", meta(PermissionCategory::Analytics))
            .role_baseline(Role::TeamLead, ["a.view", "a.view"])
            .build()
            .unwrap();

        assert_eq!(catalog.baseline(Role::TeamLead).len(), 1);
        assert!(catalog.baseline(Role::Client).is_empty());
        assert_eq!(catalog.roles_granting("a.view"), 1);
    }

    #[test]
    fn test_lookup_preserves_definition_order() {
        let catalog = Catalog::builder()
            .permission("z.view", meta(PermissionCategory::Users))
            .permission("a.view", meta(PermissionCategory::Analytics))
            .permission("m.view", meta(PermissionCategory::Users))
            .build()
            .unwrap();

        let users: Vec<&str> = catalog
            .by_category(PermissionCategory::Users)
            .map(Permission::as_str)
            .collect();
        assert_eq!(users, vec!["z.view", "m.view"]);
        assert!(catalog.metadata("missing").is_none());
    }
}
