//! Normalization from Shopify GraphQL nodes to [`catsync_core`] types.

use std::collections::HashSet;

use catsync_core::products::normalize_sku;
use catsync_core::{CategoryPath, SourceProduct};

use crate::types::ProductNode;

/// Normalizes a [`ProductNode`] into a [`SourceProduct`].
///
/// Blank SKUs and blank category names become `None`.
#[must_use]
pub fn normalize_product(node: ProductNode) -> SourceProduct {
    let sku = normalize_sku(node.first_sku()).map(str::to_owned);
    let (category_name, category_path) = match node.category {
        Some(category) => (
            Some(category.name).filter(|s| !s.is_empty()),
            Some(category.full_name).filter(|s| !s.is_empty()),
        ),
        None => (None, None),
    };

    SourceProduct {
        id: node.id,
        title: node.title,
        sku,
        category_name,
        category_path,
    }
}

/// Collects the distinct category paths carried by `products`, in the order
/// they are first seen. Products without a category are ignored.
#[must_use]
pub fn collect_category_paths(products: &[ProductNode]) -> Vec<CategoryPath> {
    let mut seen: HashSet<&str> = HashSet::new();
    products
        .iter()
        .filter_map(|p| p.category.as_ref())
        .map(|c| c.full_name.as_str())
        .filter(|full_name| seen.insert(*full_name))
        .map(CategoryPath::parse)
        .filter(|path| !path.is_empty())
        .collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
