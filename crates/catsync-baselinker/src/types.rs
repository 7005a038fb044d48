//! `BaseLinker` connector response types.
//!
//! Every call answers `{"status": "SUCCESS", ...}` or
//! `{"status": "ERROR", "error_code": ..., "error_message": ...}`; the
//! status is checked by the client before these types are deserialized.
//!
//! The connector is a PHP service, which shows in the wire format:
//! - Collections keyed by id are JSON objects with numeric string keys
//!   (`{"123": {...}}`), but an empty collection is serialized as `[]`.
//!   [`Keyed`] accepts both.
//! - Numeric ids are usually numbers but occasionally numeric strings.
//!   Id fields go through [`lenient_id`].

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use catsync_core::{RemoteCategory, TargetProduct};

/// A collection serialized either as an id-keyed object or as a plain list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Keyed<T> {
    Map(BTreeMap<String, T>),
    List(Vec<T>),
}

impl<T> Default for Keyed<T> {
    fn default() -> Self {
        Keyed::List(Vec::new())
    }
}

impl<T> Keyed<T> {
    /// Entries paired with their parsed key, ordered by ascending numeric
    /// key. List entries have no key and keep their wire order.
    #[must_use]
    pub fn into_entries(self) -> Vec<(Option<i64>, T)> {
        match self {
            Keyed::Map(map) => {
                let mut entries: Vec<(Option<i64>, T)> = map
                    .into_iter()
                    .map(|(key, value)| (key.trim().parse::<i64>().ok(), value))
                    .collect();
                entries.sort_by_key(|(key, _)| key.unwrap_or(i64::MAX));
                entries
            }
            Keyed::List(list) => list.into_iter().map(|value| (None, value)).collect(),
        }
    }
}

/// Accepts an id as a JSON number, a numeric string, or `null`.
///
/// # Errors
///
/// Only fails if the input is not valid JSON; unrecognized shapes map to `None`.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

// ---------------------------------------------------------------------------
// getInventoryCategories
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CategoriesResponse {
    #[serde(default)]
    pub categories: Option<Keyed<CategoryEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryEntry {
    #[serde(default, deserialize_with = "lenient_id")]
    pub category_id: Option<i64>,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_id")]
    pub parent_id: Option<i64>,
}

impl CategoriesResponse {
    /// Flattens the response into [`RemoteCategory`] values. Entries without
    /// an id (neither in the body nor as a map key) are dropped.
    #[must_use]
    pub fn into_categories(self) -> Vec<RemoteCategory> {
        self.categories
            .unwrap_or_default()
            .into_entries()
            .into_iter()
            .filter_map(|(key, entry)| {
                let id = entry.category_id.or(key)?;
                Some(RemoteCategory {
                    id,
                    name: entry.name,
                    parent_id: entry.parent_id.unwrap_or(0),
                })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// addInventoryCategory
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AddCategoryResponse {
    #[serde(default, deserialize_with = "lenient_id")]
    pub category_id: Option<i64>,
}

// ---------------------------------------------------------------------------
// getInventoryProductsList
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ProductsListResponse {
    #[serde(default)]
    pub products: Keyed<ProductListEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ProductListEntry {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
}

impl ProductsListResponse {
    /// Product ids in ascending order.
    #[must_use]
    pub fn into_ids(self) -> Vec<i64> {
        self.products
            .into_entries()
            .into_iter()
            .filter_map(|(key, entry)| key.or(entry.id))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// getInventoryProductsData
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ProductsDataResponse {
    #[serde(default)]
    pub products: Keyed<ProductData>,
}

#[derive(Debug, Deserialize)]
pub struct ProductData {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub sku: Option<String>,
    /// `0` when the product has no category.
    #[serde(default, deserialize_with = "lenient_id")]
    pub category_id: Option<i64>,
    /// Object of localized text fields; `[]` when empty.
    #[serde(default)]
    pub text_fields: serde_json::Value,
}

impl ProductsDataResponse {
    /// Converts the response into [`TargetProduct`] values ordered by id.
    #[must_use]
    pub fn into_products(self) -> Vec<TargetProduct> {
        self.products
            .into_entries()
            .into_iter()
            .filter_map(|(key, data)| {
                let id = key.or(data.id)?;
                let name = data
                    .text_fields
                    .get("name")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_owned);
                Some(TargetProduct {
                    id,
                    sku: data.sku,
                    current_category_id: data.category_id.filter(|&c| c != 0),
                    name,
                })
            })
            .collect()
    }
}
