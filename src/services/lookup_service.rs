//! 权限检索：全文搜索、按分类与按角色查询

use super::PermissionEngine;
use crate::models::{Permission, PermissionCategory, Role};

impl PermissionEngine {
    /// Case-insensitive substring search over labels, descriptions and tags.
    /// An empty query lists the whole catalog.
    pub fn search_permissions(&self, query: &str) -> Vec<Permission> {
        let needle = query.to_lowercase();

        let results: Vec<Permission> = self
            .catalog
            .iter()
            .filter(|entry| needle.is_empty() || entry.metadata.matches_lowercase(&needle))
            .map(|entry| entry.permission.clone())
            .collect();

        metrics::counter!("permission_searches_total").increment(1);
        tracing::debug!(query = %query, results = results.len(), "Permission search");

        results
    }

    pub fn permissions_by_category(&self, category: PermissionCategory) -> Vec<Permission> {
        self.catalog.by_category(category).cloned().collect()
    }

    /// 未知分类返回空列表
    pub fn permissions_by_category_name(&self, category: &str) -> Vec<Permission> {
        match category.parse::<PermissionCategory>() {
            Ok(category) => self.permissions_by_category(category),
            Err(_) => Vec::new(),
        }
    }

    /// Baseline permissions for a role name; unknown roles yield an empty list
    pub fn common_permissions_for_role(&self, role: &str) -> Vec<Permission> {
        match role.parse::<Role>() {
            Ok(role) => self.catalog.baseline(role).to_vec(),
            Err(_) => Vec::new(),
        }
    }

    /// 角色基线是否包含该权限（路由层的访问控制判断）
    pub fn role_has_permission(&self, role: &str, permission: &str) -> bool {
        match role.parse::<Role>() {
            Ok(role) => self.catalog.baseline(role).iter().any(|p| p == permission),
            Err(_) => false,
        }
    }
}
