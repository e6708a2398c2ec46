//! 权限差异计算

use std::collections::HashSet;

use super::PermissionEngine;
use crate::models::{Permission, PermissionDiff};

/// 去重并保留首次出现的顺序
pub(crate) fn unique<S: AsRef<str>>(items: &[S]) -> Vec<&str> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .map(AsRef::as_ref)
        .filter(|p| seen.insert(*p))
        .collect()
}

/// Compare two permission collections as sets.
///
/// `added` keeps target order, `removed` and `unchanged` keep current order.
/// Duplicates collapse silently.
pub fn calculate_diff<C, T>(current: &[C], target: &[T]) -> PermissionDiff
where
    C: AsRef<str>,
    T: AsRef<str>,
{
    let current = unique(current);
    let target = unique(target);

    let current_set: HashSet<&str> = current.iter().copied().collect();
    let target_set: HashSet<&str> = target.iter().copied().collect();

    let added: Vec<Permission> = target
        .iter()
        .filter(|p| !current_set.contains(*p))
        .map(|p| Permission::from(*p))
        .collect();

    let (unchanged, removed): (Vec<&str>, Vec<&str>) =
        current.iter().partition(|p| target_set.contains(*p));

    let total = current.len() + added.len();

    PermissionDiff {
        added,
        removed: removed.into_iter().map(Permission::from).collect(),
        unchanged: unchanged.into_iter().map(Permission::from).collect(),
        total,
    }
}

impl PermissionEngine {
    pub fn calculate_diff<C, T>(&self, current: &[C], target: &[T]) -> PermissionDiff
    where
        C: AsRef<str>,
        T: AsRef<str>,
    {
        let diff = calculate_diff(current, target);

        tracing::debug!(
            added = diff.added.len(),
            removed = diff.removed.len(),
            unchanged = diff.unchanged.len(),
            total = diff.total,
            "Permission diff calculated"
        );

        diff
    }
}
