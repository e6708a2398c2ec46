//! 权限校验测试
//!
//! 覆盖依赖检查、冲突告警、风险等级与降级行为

mod common;

use permission_engine::{
    models::{Permission, RiskLevel, ValidationErrorKind, ValidationWarningKind},
    AppError, PermissionEngine,
};

// ==================== 依赖 ====================

#[test]
fn test_missing_dependency_reported() {
    let engine = common::create_test_engine();

    let result = engine.validate(&["users.manage"]);

    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind, ValidationErrorKind::MissingDependency);
    assert_eq!(result.errors[0].permission, "users.manage");
    assert_eq!(result.errors[0].detail, "users.view");
}

#[test]
fn test_dependency_satisfied() {
    let engine = common::create_test_engine();

    let result = engine.validate(&["users.manage", "users.view"]);

    assert!(result.is_valid);
    assert!(result.errors.is_empty());
}

#[test]
fn test_every_builtin_dependency_is_enforced() {
    let engine = PermissionEngine::builtin();

    for entry in engine.catalog().iter() {
        if entry.metadata.dependencies.is_empty() {
            continue;
        }
        let result = engine.validate(&[entry.permission.as_str()]);
        assert!(
            result
                .errors
                .iter()
                .any(|e| e.kind == ValidationErrorKind::MissingDependency && e.permission == entry.permission),
            "{} should report missing dependencies",
            entry.permission
        );
    }
}

// ==================== 冲突 ====================

#[test]
fn test_one_directional_conflict_is_warning_only() {
    let engine = common::create_test_engine();

    let result = engine.validate(&["system.root", "users.view", "users.manage"]);

    assert!(result.is_valid);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].kind, ValidationWarningKind::Conflict);
    assert_eq!(result.warnings[0].permission, "users.manage");
    assert_eq!(result.warnings[0].detail, "system.root");
}

#[test]
fn test_symmetric_conflict_not_double_reported() {
    let engine = PermissionEngine::builtin();

    let result = engine.validate(&[
        "billing.view",
        "billing.invoices.create",
        "billing.payments.approve",
    ]);

    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].permission, "billing.invoices.create");
}

// ==================== 风险等级 ====================

#[test]
fn test_risk_is_maximum_over_set() {
    let engine = common::create_test_engine();

    assert_eq!(engine.validate(&["reports.view"]).risk_level, RiskLevel::Low);
    assert_eq!(
        engine.validate(&["reports.view", "reports.export"]).risk_level,
        RiskLevel::Medium
    );
    assert_eq!(engine.validate(&["system.root"]).risk_level, RiskLevel::Critical);
}

#[test]
fn test_adding_permission_never_lowers_risk() {
    let engine = PermissionEngine::builtin();
    let all: Vec<Permission> = engine.catalog().permissions().cloned().collect();

    let mut set: Vec<Permission> = Vec::new();
    let mut previous = engine.validate(&set).risk_level;
    for permission in all {
        set.push(permission);
        let current = engine.validate(&set).risk_level;
        assert!(current >= previous);
        previous = current;
    }
    assert_eq!(previous, RiskLevel::Critical);
}

// ==================== 降级与边界 ====================

#[test]
fn test_empty_set_baseline() {
    let engine = common::create_test_engine();
    let empty: [&str; 0] = [];

    let result = engine.validate(&empty);

    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
    assert_eq!(result.risk_level, RiskLevel::Low);
}

#[test]
fn test_unknown_permission_degrades_gracefully() {
    let engine = common::create_test_engine();

    let result = engine.validate(&["nonexistent.permission"]);

    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert_eq!(result.risk_level, RiskLevel::Low);
}

#[test]
fn test_duplicates_do_not_duplicate_errors() {
    let engine = common::create_test_engine();

    let result = engine.validate(&["users.manage", "users.manage"]);

    assert_eq!(result.errors.len(), 1);
}

#[test]
fn test_full_builtin_catalog_validates() {
    let engine = PermissionEngine::builtin();
    let all: Vec<Permission> = engine.catalog().permissions().cloned().collect();

    let result = engine.validate(&all);

    assert!(result.is_valid);
    assert_eq!(result.risk_level, RiskLevel::Critical);
    assert!(!result.warnings.is_empty());
}

// ==================== canGrant ====================

#[test]
fn test_can_grant_without_dependencies() {
    let engine = common::create_test_engine();
    let empty: [&str; 0] = [];

    assert!(engine.can_grant_permission("reports.view", &empty));
    assert!(engine.can_grant_permission("unknown.permission", &empty));
}

#[test]
fn test_can_grant_gate_for_all_builtin_permissions() {
    let engine = PermissionEngine::builtin();
    let empty: [&str; 0] = [];

    for entry in engine.catalog().iter() {
        let deps = &entry.metadata.dependencies;
        if deps.is_empty() {
            assert!(engine.can_grant_permission(entry.permission.as_str(), &empty));
        } else {
            assert!(!engine.can_grant_permission(entry.permission.as_str(), &empty));
            assert!(engine.can_grant_permission(entry.permission.as_str(), deps));
        }
    }
}

// ==================== 角色写入关口 ====================

#[test]
fn test_require_valid() {
    let engine = common::create_test_engine();

    let err = engine.require_valid(&["reports.export"]).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(err.code(), 400);
    assert!(err.user_message().contains("reports.export requires reports.view"));

    let ok = engine.require_valid(&["reports.export", "reports.view"]).unwrap();
    assert!(ok.is_valid);
}

#[test]
fn test_dependency_closure_on_synthetic_catalog() {
    let engine = common::create_test_engine();

    assert_eq!(engine.dependency_closure("users.manage"), vec![Permission::from("users.view")]);
    assert!(engine.dependency_closure("users.view").is_empty());
}
