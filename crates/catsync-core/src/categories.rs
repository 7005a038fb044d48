//! Category paths and the name-keyed category tree built from them.
//!
//! Source categories arrive as fully-qualified path strings such as
//! `"Apparel > Shoes > Running"`. [`build_tree`] folds a set of those paths
//! into a forest keyed by level name, where two paths sharing a prefix share
//! the same nodes.

use std::collections::{HashMap, HashSet};

/// Separator between levels in a source category path.
pub const PATH_SEPARATOR: &str = " > ";

/// An ordered sequence of category level names, root first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryPath(Vec<String>);

impl CategoryPath {
    /// Splits a `" > "`-delimited path string into its levels.
    ///
    /// Empty segments are dropped, so a blank string yields an empty path.
    #[must_use]
    pub fn parse(full_name: &str) -> Self {
        Self(
            full_name
                .split(PATH_SEPARATOR)
                .filter(|segment| !segment.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The most specific level, if the path is non-empty.
    #[must_use]
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(PATH_SEPARATOR))
    }
}

/// A single named category in the source hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNode {
    pub name: String,
    /// Name of the parent node; `None` for a root.
    pub parent: Option<String>,
    /// Child names in discovery order.
    pub children: Vec<String>,
}

/// A name that was seen under a parent other than the one it was first
/// registered with. The tree keeps `kept_parent`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParentConflict {
    pub name: String,
    pub kept_parent: Option<String>,
    pub ignored_parent: Option<String>,
}

/// Forest of [`CategoryNode`]s keyed by name, iterable in insertion order.
///
/// Every node is inserted after its parent, so insertion order is already a
/// valid parent-before-child order.
#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    nodes: Vec<CategoryNode>,
    index: HashMap<String, usize>,
    conflicts: Vec<ParentConflict>,
}

impl CategoryTree {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CategoryNode> {
        self.index.get(name).map(|&i| &self.nodes[i])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryNode> {
        self.nodes.iter()
    }

    /// Nodes without a parent, in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = &CategoryNode> {
        self.nodes.iter().filter(|n| n.parent.is_none())
    }

    /// Names that were seen under more than one parent.
    #[must_use]
    pub fn conflicts(&self) -> &[ParentConflict] {
        &self.conflicts
    }

    /// Depth-first, pre-order walk from every root: each node is yielded
    /// strictly after its parent.
    #[must_use]
    pub fn topological_order(&self) -> Vec<&CategoryNode> {
        let mut ordered = Vec::with_capacity(self.nodes.len());
        let mut visited: HashSet<&str> = HashSet::with_capacity(self.nodes.len());

        for root in self.roots() {
            let mut stack = vec![root];
            while let Some(node) = stack.pop() {
                if !visited.insert(node.name.as_str()) {
                    continue;
                }
                ordered.push(node);
                // Reverse so the first-discovered child is visited first.
                for child in node.children.iter().rev() {
                    if let Some(child_node) = self.get(child) {
                        stack.push(child_node);
                    }
                }
            }
        }

        ordered
    }

    fn insert(&mut self, node: CategoryNode) {
        self.index.insert(node.name.clone(), self.nodes.len());
        self.nodes.push(node);
    }

    fn record_conflict(&mut self, conflict: ParentConflict) {
        if !self.conflicts.contains(&conflict) {
            self.conflicts.push(conflict);
        }
    }
}

/// Builds the category forest from a set of paths.
///
/// Each path is walked root to leaf. A level name seen for the first time
/// becomes a node under the preceding level and is appended to that parent's
/// children. A name already in the tree keeps its first parent; if it shows
/// up under a different parent, the mismatch is recorded in
/// [`CategoryTree::conflicts`] and otherwise ignored.
#[must_use]
pub fn build_tree<'a, I>(paths: I) -> CategoryTree
where
    I: IntoIterator<Item = &'a CategoryPath>,
{
    let mut tree = CategoryTree::default();

    for path in paths {
        let mut parent: Option<&str> = None;

        for level in path.segments() {
            if let Some(existing) = tree.get(level) {
                if existing.parent.as_deref() != parent {
                    let conflict = ParentConflict {
                        name: level.clone(),
                        kept_parent: existing.parent.clone(),
                        ignored_parent: parent.map(str::to_owned),
                    };
                    tree.record_conflict(conflict);
                }
            } else {
                tree.insert(CategoryNode {
                    name: level.clone(),
                    parent: parent.map(str::to_owned),
                    children: Vec::new(),
                });
                if let Some(parent_name) = parent {
                    if let Some(&i) = tree.index.get(parent_name) {
                        tree.nodes[i].children.push(level.clone());
                    }
                }
            }
            parent = Some(level.as_str());
        }
    }

    tree
}

#[cfg(test)]
#[path = "categories_test.rs"]
mod tests;
