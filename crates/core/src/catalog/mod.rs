//! Catalog items and the faceted product filter.
//!
//! A collection page fetches its products once, converts them to
//! [`CatalogItem`]s and then derives everything else locally:
//!
//! ```text
//!  query string ──► QueryParams ──► FilterState ─┐
//!                                                ├─► Listing (filtered + sorted)
//!  Vec<CatalogItem> ─────────────────────────────┤
//!                                                └─► Facets (counts over the full list)
//! ```
//!
//! Facet counts are always computed from the unfiltered list so they answer
//! "how many items carry this value", independent of the current selection.

mod facets;
mod filter;
pub mod price_control;
mod query;
mod sort;
mod tags;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Price;

pub use facets::{FREE_TAG_LIMIT, FacetValue, Facets, PriceBounds};
pub use filter::{Dimension, FilterState, Listing, ListingStatus, PriceFilter, filter_items};
pub use price_control::{PRICE_COMMIT_DELAY, PriceCommit, PriceControl, PriceControlState, PriceRange};
pub use query::{QueryParams, params};
pub use sort::{SortKey, sort_items};
pub use tags::{StructuredKey, is_free_tag, structured_value};

/// Selected option on a variant (e.g., `Size = M`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

impl SelectedOption {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A purchasable configuration of a [`CatalogItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    pub available_for_sale: bool,
    pub options: Vec<SelectedOption>,
}

impl Variant {
    /// Value of the first option named `Size` (case-insensitive).
    #[must_use]
    pub fn size(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|opt| opt.name.eq_ignore_ascii_case("size"))
            .map(|opt| opt.value.as_str())
    }
}

/// A sellable product as the storefront sees it.
///
/// Read-only: fetched fresh for each page and never mutated by filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Opaque identifier, unique within one catalog fetch.
    pub id: String,
    pub handle: String,
    pub title: String,
    /// Free-text tags; some are structured as `key:value`.
    pub tags: Vec<String>,
    /// Maximum variant price. `None` when the upstream amount did not parse.
    pub price: Option<Price>,
    pub created_at: Option<DateTime<Utc>>,
    pub variants: Vec<Variant>,
    /// Featured image URL.
    pub image: Option<String>,
}

impl CatalogItem {
    /// Cleaned value of the first tag carrying `key`, if any.
    #[must_use]
    pub fn structured(&self, key: StructuredKey) -> Option<String> {
        structured_value(&self.tags, key)
    }

    /// Whether the item carries exactly this tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Sizes of every variant, one entry per variant that has a size.
    pub fn variant_sizes(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().filter_map(Variant::size)
    }
}
