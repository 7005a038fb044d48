//! Shopify cursor-based pagination via the GraphQL `pageInfo` object.
//!
//! Each page of a connection carries `hasNextPage` and `endCursor`; the next
//! page is requested with `after: endCursor`.

use crate::types::PageInfo;

/// Returns the cursor for the next page, or `None` when the last page has
/// been reached.
///
/// A page claiming `hasNextPage: true` without an `endCursor` (or with an
/// empty one) is treated as the last page, since it cannot be advanced.
#[must_use]
pub fn next_cursor(page_info: &PageInfo) -> Option<String> {
    if !page_info.has_next_page {
        return None;
    }
    page_info
        .end_cursor
        .as_deref()
        .filter(|cursor| !cursor.is_empty())
        .map(str::to_owned)
}
