use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A category as it exists on the inventory platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCategory {
    pub id: i64,
    pub name: String,
    /// `0` for a root category on the inventory platform.
    pub parent_id: i64,
}

/// A storefront product reduced to the fields category sync needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceProduct {
    /// Storefront global ID, e.g. `"gid://shopify/Product/123"`.
    pub id: String,
    pub title: String,
    /// SKU of the first variant. Blank SKUs are normalized to `None`.
    pub sku: Option<String>,
    /// Leaf category name, e.g. `"Running"`.
    pub category_name: Option<String>,
    /// Full category path, e.g. `"Apparel > Shoes > Running"`.
    pub category_path: Option<String>,
}

/// An inventory-platform product with its current category assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetProduct {
    pub id: i64,
    pub sku: Option<String>,
    pub current_category_id: Option<i64>,
    /// Display name from the product's text fields, if present.
    pub name: Option<String>,
}

impl TargetProduct {
    /// Name for log lines, falling back to the numeric id.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("product #{}", self.id))
    }
}

/// Returns `None` for absent, empty, or whitespace-only SKUs.
#[must_use]
pub fn normalize_sku(sku: Option<&str>) -> Option<&str> {
    sku.filter(|s| !s.trim().is_empty())
}

/// SKU → target product lookup built once per run.
///
/// When several target products share a SKU, the first one in iteration
/// order is kept. SKU comparison is exact (case and whitespace sensitive).
#[derive(Debug)]
pub struct SkuIndex<'a> {
    by_sku: HashMap<&'a str, &'a TargetProduct>,
}

impl<'a> SkuIndex<'a> {
    #[must_use]
    pub fn build(products: &'a [TargetProduct]) -> Self {
        let mut by_sku = HashMap::with_capacity(products.len());
        for product in products {
            if let Some(sku) = normalize_sku(product.sku.as_deref()) {
                by_sku.entry(sku).or_insert(product);
            }
        }
        Self { by_sku }
    }

    #[must_use]
    pub fn get(&self, sku: &str) -> Option<&'a TargetProduct> {
        self.by_sku.get(sku).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_sku.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_sku.is_empty()
    }
}

/// Builds a name → id lookup from the remote category list. The first
/// category carrying a name wins.
#[must_use]
pub fn category_ids_by_name(categories: &[RemoteCategory]) -> HashMap<String, i64> {
    let mut lookup = HashMap::with_capacity(categories.len());
    for category in categories {
        lookup.entry(category.name.clone()).or_insert(category.id);
    }
    lookup
}
