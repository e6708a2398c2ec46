//! 测试公共模块
//! 提供合成权限目录和测试辅助函数

#![allow(dead_code)]

use permission_engine::{
    models::{PermissionCategory, PermissionMetadata, RiskLevel, Role},
    Catalog, PermissionEngine,
};
use std::sync::Arc;

/// 创建小型合成目录
///
/// - `reports.export` 依赖 `reports.view`
/// - `users.manage` 依赖 `users.view`，并单向声明与 `system.root` 冲突
pub fn create_test_catalog() -> Catalog {
    Catalog::builder()
        .permission(
            "reports.view",
            PermissionMetadata::new(
                PermissionCategory::Analytics,
                RiskLevel::Low,
                "View Reports",
                "Read analytics reports",
            )
            .tagged(["dashboard"]),
        )
        .permission(
            "reports.export",
            PermissionMetadata::new(
                PermissionCategory::Analytics,
                RiskLevel::Medium,
                "Export Reports",
                "Download report data",
            )
            .depends_on(["reports.view"])
            .tagged(["csv"]),
        )
        .permission(
            "users.view",
            PermissionMetadata::new(
                PermissionCategory::Users,
                RiskLevel::Low,
                "View Users",
                "Browse the user directory",
            ),
        )
        .permission(
            "users.manage",
            PermissionMetadata::new(
                PermissionCategory::Users,
                RiskLevel::High,
                "Manage Users",
                "Create, edit and disable accounts",
            )
            .depends_on(["users.view"])
            .conflicts_with(["system.root"]),
        )
        .permission(
            "system.root",
            PermissionMetadata::new(
                PermissionCategory::System,
                RiskLevel::Critical,
                "Root Access",
                "Unrestricted system access",
            ),
        )
        .role_baseline(Role::Client, ["reports.view"])
        .role_baseline(Role::TeamMember, ["reports.view", "users.view"])
        .role_baseline(Role::TeamLead, ["reports.view", "users.view", "reports.export"])
        .role_baseline(
            Role::Admin,
            ["reports.view", "users.view", "reports.export", "users.manage", "system.root"],
        )
        .role_baseline(
            Role::SuperAdmin,
            ["reports.view", "users.view", "reports.export", "users.manage", "system.root"],
        )
        .build()
        .expect("Failed to build test catalog")
}

/// 基于合成目录的引擎
pub fn create_test_engine() -> PermissionEngine {
    PermissionEngine::new(Arc::new(create_test_catalog()))
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
