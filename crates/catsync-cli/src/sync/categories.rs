//! Category reconciliation: create every source category the target lacks,
//! parents before children.

use std::collections::{HashMap, HashSet};

use catsync_baselinker::BaselinkerClient;
use catsync_core::products::category_ids_by_name;
use catsync_core::{build_tree, AppConfig, CategoryTree, RemoteCategory};

use super::error::SyncError;
use super::fetch::{self, SourceCatalog};
use super::target::CategoryTarget;

/// Counts of what a reconciliation pass did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct ReconcileReport {
    pub created: usize,
    pub existing: usize,
    /// Categories a dry run would have created.
    pub planned: usize,
    pub failed: usize,
    pub conflicts: usize,
}

/// Name → target id lookup, grown as categories are created.
///
/// In a dry run, categories that would be created are recorded as planned so
/// their children can be previewed too; planned names never carry an id.
#[derive(Debug, Default)]
pub(crate) struct CategoryLookup {
    ids: HashMap<String, i64>,
    planned: HashSet<String>,
}

/// Where a category's parent stands on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParentRef {
    /// Target id of the parent, `0` for a root.
    Id(i64),
    /// The parent would be created by this dry run.
    Planned,
}

impl CategoryLookup {
    pub(crate) fn from_remote(remote: &[RemoteCategory]) -> Self {
        Self {
            ids: category_ids_by_name(remote),
            planned: HashSet::new(),
        }
    }

    pub(crate) fn id(&self, name: &str) -> Option<i64> {
        self.ids.get(name).copied()
    }

    pub(crate) fn ids(&self) -> &HashMap<String, i64> {
        &self.ids
    }

    fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    fn parent_ref(&self, parent: Option<&str>) -> Option<ParentRef> {
        match parent {
            None => Some(ParentRef::Id(0)),
            Some(name) => {
                if let Some(id) = self.id(name) {
                    Some(ParentRef::Id(id))
                } else if self.planned.contains(name) {
                    Some(ParentRef::Planned)
                } else {
                    None
                }
            }
        }
    }
}

/// Creates every node of `tree` that is missing from `lookup`.
///
/// Nodes are visited in [`CategoryTree::topological_order`]. Each created id
/// is inserted into `lookup` before the next node is looked at, so children
/// resolve their parent within the same pass.
///
/// # Errors
///
/// Returns [`SyncError::MissingParent`] as soon as a node's parent has no id,
/// which happens when the parent's own creation failed. No further
/// categories are created after that.
pub(crate) async fn reconcile<T>(
    tree: &CategoryTree,
    lookup: &mut CategoryLookup,
    target: &T,
    dry_run: bool,
) -> Result<ReconcileReport, SyncError>
where
    T: CategoryTarget,
{
    let mut report = ReconcileReport {
        conflicts: tree.conflicts().len(),
        ..ReconcileReport::default()
    };

    for conflict in tree.conflicts() {
        tracing::warn!(
            category = %conflict.name,
            kept_parent = conflict.kept_parent.as_deref().unwrap_or("<root>"),
            ignored_parent = conflict.ignored_parent.as_deref().unwrap_or("<root>"),
            "category name appears under more than one parent; keeping the first"
        );
    }

    for node in tree.topological_order() {
        let parent_name = node.parent.as_deref();

        let Some(parent) = lookup.parent_ref(parent_name) else {
            let err = SyncError::MissingParent {
                category: node.name.clone(),
                parent: parent_name.unwrap_or_default().to_owned(),
            };
            tracing::error!(
                category = %node.name,
                parent = parent_name.unwrap_or_default(),
                "{err}"
            );
            return Err(err);
        };

        if lookup.contains(&node.name) {
            tracing::debug!(category = %node.name, "category already exists");
            report.existing += 1;
            continue;
        }

        // Planned parents are only ever recorded in a dry run.
        let parent_id = match parent {
            ParentRef::Id(id) if !dry_run => id,
            _ => {
                tracing::info!(
                    dry_run = true,
                    category = %node.name,
                    parent = parent_name.unwrap_or("Root"),
                    "would add category"
                );
                lookup.planned.insert(node.name.clone());
                report.planned += 1;
                continue;
            }
        };

        tracing::info!(
            category = %node.name,
            parent = parent_name.unwrap_or("Root"),
            parent_id,
            "adding category"
        );
        match target.create_category(&node.name, parent_id).await {
            Ok(id) => {
                lookup.ids.insert(node.name.clone(), id);
                report.created += 1;
            }
            Err(e) => {
                tracing::error!(category = %node.name, error = %e, "error adding category");
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

/// Builds the category tree from the Shopify catalog, reads the `BaseLinker`
/// category list and creates what is missing.
///
/// # Errors
///
/// Propagates [`SyncError::MissingParent`] from [`reconcile`].
pub(crate) async fn run_category_sync(
    config: &AppConfig,
    source: &SourceCatalog,
    baselinker: &BaselinkerClient,
) -> Result<ReconcileReport, SyncError> {
    let tree = build_tree(&source.paths);
    tracing::info!(categories = tree.len(), "built category tree");

    tracing::info!("fetching BaseLinker categories");
    let remote = fetch::fetch_target_categories(baselinker).await;
    let mut lookup = CategoryLookup::from_remote(&remote);

    let report = reconcile(&tree, &mut lookup, baselinker, config.dry_run).await?;
    tracing::info!(
        created = report.created,
        existing = report.existing,
        planned = report.planned,
        failed = report.failed,
        conflicts = report.conflicts,
        known = lookup.ids().len(),
        dry_run = config.dry_run,
        "category sync complete"
    );
    Ok(report)
}

#[cfg(test)]
#[path = "categories_test.rs"]
mod tests;
