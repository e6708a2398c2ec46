//! Business logic services layer

pub mod diff_service;
pub mod lookup_service;
pub mod permission_engine;
pub mod suggestion_service;
pub mod validation_service;

pub use diff_service::calculate_diff;
pub use permission_engine::PermissionEngine;
