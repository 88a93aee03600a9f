//! Dynamic query resolution for product listings.
//!
//! A caller-supplied sort field only reaches the store after it has been
//! resolved against [`ProductField`], the fixed set of sortable product fields.

use serde::Serialize;
use std::str::FromStr;
use strum::{Display, EnumString, VariantNames};

use crate::models::Pagination;

/// Sortable product fields. Names match case-sensitively.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Display,
    EnumString,
    VariantNames,
)]
pub enum ProductField {
    #[default]
    Id,
    Name,
    Description,
    AvailableQuantity,
    Price,
}

impl ProductField {
    /// Every permitted field name, in declaration order
    pub fn names() -> &'static [&'static str] {
        Self::VARIANTS
    }

    /// Resolve a caller-supplied name; `None` if it is not a product field.
    pub fn resolve(name: &str) -> Option<Self> {
        Self::from_str(name).ok()
    }
}

/// A bounded, fully resolved scan handed to the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// Case-insensitive substring to match against the name
    pub name_contains: Option<String>,
    /// Sort key, ascending. Ties are broken by id ascending.
    pub order_by: ProductField,
    /// Rows to skip
    pub offset: u64,
    /// Rows to return
    pub limit: u64,
}

impl ProductQuery {
    /// Build the scan for a checked search. An empty name means no filter.
    pub fn new(name_to_find: Option<&str>, order_by: ProductField, pagination: Pagination) -> Self {
        let name_contains = name_to_find
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let (offset, limit) = page_bounds(pagination);

        Self {
            name_contains,
            order_by,
            offset,
            limit,
        }
    }
}

/// `(skip, take)` for a page: skip `(page_number - 1) * page_size` rows, take `page_size`.
pub fn page_bounds(pagination: Pagination) -> (u64, u64) {
    let page_index = pagination.page_number.saturating_sub(1).max(0) as u64;
    let page_size = pagination.page_size.max(0) as u64;
    (page_index.saturating_mul(page_size), page_size)
}

/// Build a `LIKE` pattern matching `needle` anywhere, with wildcards in the
/// needle escaped so they match literally.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
