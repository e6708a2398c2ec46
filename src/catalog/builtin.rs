//! 内置权限目录
//! 进程内只构建一次，之后所有线程只读共享

use once_cell::sync::Lazy;
use std::sync::Arc;

use super::Catalog;
use crate::error::Result;
use crate::models::{
    PermissionCategory::{self, *},
    PermissionMetadata,
    RiskLevel::{self, *},
    Role,
};

static BUILTIN_CATALOG: Lazy<Arc<Catalog>> = Lazy::new(|| {
    // 内置数据由单元测试覆盖，构建失败属于程序错误
    Arc::new(build_builtin().expect("built-in permission catalog is inconsistent"))
});

/// Process-wide built-in catalog
pub fn builtin() -> Arc<Catalog> {
    BUILTIN_CATALOG.clone()
}

fn meta(
    category: PermissionCategory,
    risk: RiskLevel,
    label: &str,
    description: &str,
) -> PermissionMetadata {
    PermissionMetadata::new(category, risk, label, description)
}

const CLIENT_BASELINE: &[&str] = &["analytics.view", "teams.view", "billing.view"];

const TEAM_MEMBER_EXTRA: &[&str] = &["users.view", "analytics.export", "integrations.view"];

const TEAM_LEAD_EXTRA: &[&str] = &[
    "users.create",
    "users.edit",
    "users.export",
    "roles.view",
    "teams.manage",
    "teams.invite",
    "analytics.manage",
    "audit.view",
    "billing.invoices.create",
];

pub(crate) fn build_builtin() -> Result<Catalog> {
    let builder = Catalog::builder()
        // 分析
        .permission(
            "analytics.view",
            meta(Analytics, Low, "View Analytics", "View dashboards and usage reports")
                .tagged(["dashboard", "reports", "metrics"]),
        )
        .permission(
            "analytics.export",
            meta(Analytics, Medium, "Export Analytics", "Download analytics data as CSV or PDF")
                .depends_on(["analytics.view"])
                .tagged(["csv", "download", "reports"]),
        )
        .permission(
            "analytics.manage",
            meta(Analytics, Medium, "Manage Analytics Dashboards", "Create and share custom dashboards")
                .depends_on(["analytics.view"])
                .tagged(["dashboard"]),
        )
        // 用户
        .permission(
            "users.view",
            meta(Users, Low, "View Users", "See the user directory and profiles")
                .tagged(["directory", "people"]),
        )
        .permission(
            "users.create",
            meta(Users, Medium, "Create Users", "Invite and create new user accounts")
                .depends_on(["users.view"])
                .tagged(["invite", "onboarding"]),
        )
        .permission(
            "users.edit",
            meta(Users, Medium, "Edit Users", "Update user profiles and status")
                .depends_on(["users.view"]),
        )
        .permission(
            "users.delete",
            meta(Users, High, "Delete Users", "Permanently remove user accounts")
                .depends_on(["users.view"])
                .tagged(["offboarding"]),
        )
        .permission(
            "users.manage",
            meta(Users, High, "Manage Users", "Full control over user accounts within the tenant")
                .depends_on(["users.view"])
                .tagged(["admin"]),
        )
        .permission(
            "users.export",
            meta(Users, Medium, "Export Users", "Export the user directory")
                .depends_on(["users.view"])
                .tagged(["csv", "download", "gdpr"]),
        )
        .permission(
            "users.bulk_operations",
            meta(Users, High, "Bulk User Operations", "Apply changes to many users at once")
                .depends_on(["users.view", "users.edit"])
                .tagged(["bulk", "batch", "import"]),
        )
        .permission(
            "users.impersonate",
            meta(Users, Critical, "Impersonate Users", "Sign in as another user for support")
                .depends_on(["users.view"])
                .conflicts_with(["audit.manage"])
                .tagged(["support", "login as"]),
        )
        // 角色
        .permission(
            "roles.view",
            meta(Roles, Low, "View Roles", "See roles and their assigned permissions"),
        )
        .permission(
            "roles.create",
            meta(Roles, Medium, "Create Roles", "Define new custom roles")
                .depends_on(["roles.view"]),
        )
        .permission(
            "roles.edit",
            meta(Roles, High, "Edit Roles", "Change the permissions granted by a role")
                .depends_on(["roles.view"]),
        )
        .permission(
            "roles.delete",
            meta(Roles, High, "Delete Roles", "Remove custom roles").depends_on(["roles.view"]),
        )
        .permission(
            "roles.assign",
            meta(Roles, High, "Assign Roles", "Grant or revoke roles for users")
                .depends_on(["roles.view", "users.view"])
                .tagged(["access"]),
        )
        // 权限
        .permission(
            "permissions.view",
            meta(Permissions, Low, "View Permissions", "Browse the permission catalog"),
        )
        .permission(
            "permissions.manage",
            meta(Permissions, Critical, "Manage Permissions", "Grant individual permissions outside roles")
                .depends_on(["permissions.view", "roles.view"])
                .tagged(["access", "admin"]),
        )
        // 团队
        .permission(
            "teams.view",
            meta(Teams, Low, "View Teams", "See teams and their members"),
        )
        .permission(
            "teams.manage",
            meta(Teams, Medium, "Manage Teams", "Create, rename and archive teams")
                .depends_on(["teams.view"]),
        )
        .permission(
            "teams.invite",
            meta(Teams, Medium, "Invite Team Members", "Add people to a team")
                .depends_on(["teams.view"])
                .tagged(["invite", "onboarding"]),
        )
        // 账单
        .permission(
            "billing.view",
            meta(Billing, Medium, "View Billing", "See invoices, plans and payment history")
                .tagged(["invoices", "payments"]),
        )
        .permission(
            "billing.manage",
            meta(Billing, High, "Manage Billing", "Change plans and payment methods")
                .depends_on(["billing.view"])
                .tagged(["subscription", "payments"]),
        )
        .permission(
            "billing.invoices.create",
            meta(Billing, Medium, "Create Invoices", "Draft and issue invoices")
                .depends_on(["billing.view"])
                .conflicts_with(["billing.payments.approve"])
                .tagged(["invoices"]),
        )
        .permission(
            "billing.payments.approve",
            meta(Billing, High, "Approve Payments", "Approve outgoing payments and refunds")
                .depends_on(["billing.view"])
                .conflicts_with(["billing.invoices.create"])
                .tagged(["payments", "refunds"]),
        )
        // 集成
        .permission(
            "integrations.view",
            meta(Integrations, Low, "View Integrations", "See connected apps and webhooks"),
        )
        .permission(
            "integrations.manage",
            meta(Integrations, High, "Manage Integrations", "Connect and configure third-party apps")
                .depends_on(["integrations.view"])
                .tagged(["api", "webhooks"]),
        )
        .permission(
            "integrations.api_keys",
            meta(Integrations, Critical, "Manage API Keys", "Create and revoke API keys")
                .depends_on(["integrations.view"])
                .tagged(["api", "tokens", "secrets"]),
        )
        // 审计
        .permission(
            "audit.view",
            meta(Audit, Medium, "View Audit Log", "Read the tenant audit trail")
                .tagged(["logs", "compliance", "history"]),
        )
        .permission(
            "audit.export",
            meta(Audit, High, "Export Audit Log", "Download audit records for compliance")
                .depends_on(["audit.view"])
                .tagged(["logs", "compliance", "csv"]),
        )
        .permission(
            "audit.manage",
            meta(Audit, Critical, "Manage Audit Retention", "Change audit retention and purge records")
                .depends_on(["audit.view"])
                .tagged(["logs", "retention"]),
        )
        // 系统
        .permission(
            "system.settings.view",
            meta(System, Medium, "View System Settings", "Read tenant-wide user management settings")
                .tagged(["configuration"]),
        )
        .permission(
            "system.settings.edit",
            meta(System, Critical, "Edit System Settings", "Change tenant-wide user management settings")
                .depends_on(["system.settings.view"])
                .tagged(["configuration"]),
        )
        .permission(
            "system.settings.export",
            meta(System, High, "Export System Settings", "Download the tenant configuration")
                .depends_on(["system.settings.view"])
                .tagged(["configuration", "download", "backup"]),
        )
        .permission(
            "system.maintenance",
            meta(System, Critical, "System Maintenance", "Run maintenance tasks and data repairs")
                .depends_on(["system.settings.view"]),
        );

    let team_member: Vec<&str> = CLIENT_BASELINE
        .iter()
        .chain(TEAM_MEMBER_EXTRA)
        .copied()
        .collect();
    let team_lead: Vec<&str> = team_member.iter().chain(TEAM_LEAD_EXTRA).copied().collect();

    // ADMIN 与 SUPER_ADMIN 拥有全部权限
    let all = builder.permission_ids();

    builder
        .role_baseline(Role::Client, CLIENT_BASELINE.iter().copied())
        .role_baseline(Role::TeamMember, team_member)
        .role_baseline(Role::TeamLead, team_lead)
        .role_baseline(Role::Admin, all.clone())
        .role_baseline(Role::SuperAdmin, all)
        .build()
}
