//! 从 JSON 文件加载权限目录

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use validator::Validate;

use super::{Catalog, CatalogBuilder};
use crate::error::Result;
use crate::models::{PermissionCategory, PermissionMetadata, RiskLevel, Role};

/// Permission definition as written in a catalog file
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PermissionDefinition {
    #[validate(length(min = 1, max = 128))]
    pub id: String,
    pub category: PermissionCategory,
    pub risk: RiskLevel,
    #[validate(length(min = 1, max = 256))]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub conflicts: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PermissionDefinition {
    fn into_metadata(self) -> (String, PermissionMetadata) {
        let metadata = PermissionMetadata::new(self.category, self.risk, self.label, self.description)
            .depends_on(self.dependencies)
            .conflicts_with(self.conflicts)
            .tagged(self.tags);
        (self.id, metadata)
    }
}

/// Top-level catalog document
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDocument {
    pub permissions: Vec<PermissionDefinition>,
    #[serde(default)]
    pub roles: BTreeMap<Role, Vec<String>>,
}

impl CatalogDocument {
    pub fn into_catalog(self) -> Result<Catalog> {
        let mut builder = CatalogBuilder::default();

        for definition in self.permissions {
            definition.validate()?;
            let (id, metadata) = definition.into_metadata();
            builder = builder.permission(id, metadata);
        }

        for (role, permissions) in self.roles {
            builder = builder.role_baseline(role, permissions);
        }

        builder.build()
    }
}

impl Catalog {
    pub fn from_json_str(json: &str) -> Result<Catalog> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        document.into_catalog()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Catalog> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&contents)?;

        tracing::info!(
            path = %path.display(),
            permissions = catalog.len(),
            "Permission catalog loaded"
        );

        Ok(catalog)
    }
}
