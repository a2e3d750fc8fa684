//! Sort order for collection listings.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::CatalogItem;

/// Sort options for a collection listing.
///
/// Sort is a display preference, not a filter: clearing filters keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortKey {
    /// Source order, the ranking supplied by the upstream collection.
    #[default]
    Recommended,
    /// Also source order; the upstream ranking is the best-seller proxy.
    BestSelling,
    /// Newest first, by creation timestamp.
    Newest,
    PriceAscending,
    PriceDescending,
}

impl SortKey {
    /// Every option, in the order the sort menu lists them.
    pub const ALL: [Self; 5] = [
        Self::Recommended,
        Self::BestSelling,
        Self::Newest,
        Self::PriceDescending,
        Self::PriceAscending,
    ];

    /// Parse a `sort` query value. Unknown values fall back to the default.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("best-selling") => Self::BestSelling,
            Some("created-descending") => Self::Newest,
            Some("price-ascending") => Self::PriceAscending,
            Some("price-descending") => Self::PriceDescending,
            _ => Self::Recommended,
        }
    }

    /// Query value; `None` for the default, which is written as an absent key.
    #[must_use]
    pub const fn as_query(self) -> Option<&'static str> {
        match self {
            Self::Recommended => None,
            Self::BestSelling => Some("best-selling"),
            Self::Newest => Some("created-descending"),
            Self::PriceAscending => Some("price-ascending"),
            Self::PriceDescending => Some("price-descending"),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recommended => "Recommended",
            Self::BestSelling => "Best Sellers",
            Self::Newest => "New Arrivals",
            Self::PriceAscending => "Price: Low to High",
            Self::PriceDescending => "Price: High to Low",
        }
    }
}

/// Stable in-place sort of a filtered view.
///
/// Items without a timestamp (or without a price) sort after those with one,
/// keeping their relative source order.
pub fn sort_items(items: &mut [&CatalogItem], key: SortKey) {
    match key {
        SortKey::Recommended | SortKey::BestSelling => {}
        SortKey::Newest => items.sort_by(|a, b| match (&a.created_at, &b.created_at) {
            (Some(a), Some(b)) => b.cmp(a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        SortKey::PriceAscending => items.sort_by(|a, b| compare_price(a, b, false)),
        SortKey::PriceDescending => items.sort_by(|a, b| compare_price(a, b, true)),
    }
}

fn compare_price(a: &CatalogItem, b: &CatalogItem, descending: bool) -> Ordering {
    match (&a.price, &b.price) {
        (Some(a), Some(b)) if descending => b.amount.cmp(&a.amount),
        (Some(a), Some(b)) => a.amount.cmp(&b.amount),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::types::Price;

    fn item(id: &str, price: Option<&str>, day: Option<u32>) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            handle: id.to_string(),
            title: id.to_string(),
            tags: Vec::new(),
            price: price.and_then(|p| Price::parse(p, "USD")),
            created_at: day.map(|d| Utc.with_ymd_and_hms(2025, 1, d, 0, 0, 0).unwrap()),
            variants: Vec::new(),
            image: None,
        }
    }

    fn ids(items: &[&CatalogItem]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn test_from_query_roundtrip() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::from_query(key.as_query()), key);
        }
        assert_eq!(SortKey::from_query(Some("bogus")), SortKey::Recommended);
        assert_eq!(SortKey::from_query(Some("")), SortKey::Recommended);
    }

    #[test]
    fn test_price_sorts_put_unpriced_last() {
        let source = [
            item("a", Some("30"), None),
            item("b", None, None),
            item("c", Some("10"), None),
            item("d", Some("20"), None),
        ];
        let mut view: Vec<&CatalogItem> = source.iter().collect();
        sort_items(&mut view, SortKey::PriceAscending);
        assert_eq!(ids(&view), ["c", "d", "a", "b"]);

        sort_items(&mut view, SortKey::PriceDescending);
        assert_eq!(ids(&view), ["a", "d", "c", "b"]);
    }

    #[test]
    fn test_newest_first() {
        let source = [
            item("old", None, Some(1)),
            item("undated", None, None),
            item("new", None, Some(20)),
        ];
        let mut view: Vec<&CatalogItem> = source.iter().collect();
        sort_items(&mut view, SortKey::Newest);
        assert_eq!(ids(&view), ["new", "old", "undated"]);
    }

    #[test]
    fn test_recommended_keeps_source_order() {
        let source = [item("x", Some("5"), None), item("y", Some("1"), None)];
        let mut view: Vec<&CatalogItem> = source.iter().collect();
        sort_items(&mut view, SortKey::BestSelling);
        assert_eq!(ids(&view), ["x", "y"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let source = [
            item("a", Some("20"), Some(3)),
            item("b", Some("20"), Some(1)),
            item("c", Some("10"), Some(2)),
        ];
        for key in SortKey::ALL {
            let mut once: Vec<&CatalogItem> = source.iter().collect();
            sort_items(&mut once, key);
            let mut twice = once.clone();
            sort_items(&mut twice, key);
            assert_eq!(ids(&once), ids(&twice), "{key:?}");
        }
    }
}
