//! Facet extraction over the unfiltered catalog.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::tags::{StructuredKey, is_free_tag};
use super::CatalogItem;
use crate::types::{CurrencyCode, format_amount};

/// Number of free tags shown as quick-filter pills.
pub const FREE_TAG_LIMIT: usize = 6;

/// One selectable facet value with the number of items (or variants) carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetValue {
    pub value: String,
    pub count: usize,
}

/// Price range across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBounds {
    pub min: Decimal,
    pub max: Decimal,
    /// Currency of the first priced item.
    pub currency_code: CurrencyCode,
}

impl PriceBounds {
    #[must_use]
    pub fn min_display(&self) -> String {
        format_amount(self.min, &self.currency_code)
    }

    #[must_use]
    pub fn max_display(&self) -> String {
        format_amount(self.max, &self.currency_code)
    }
}

/// Facet values and counts for a catalog.
///
/// Every list is ordered by descending count, ties in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    /// `None` when no item is priced or every item has the same price.
    pub price: Option<PriceBounds>,
    /// Counted once per matching variant.
    pub sizes: Vec<FacetValue>,
    pub product_types: Vec<FacetValue>,
    pub colors: Vec<FacetValue>,
    pub materials: Vec<FacetValue>,
    /// Top [`FREE_TAG_LIMIT`] plain tags.
    pub tags: Vec<FacetValue>,
}

impl Facets {
    /// Compute every facet from the full, unfiltered item list.
    #[must_use]
    pub fn from_items(items: &[CatalogItem]) -> Self {
        let mut sizes = Tally::default();
        let mut product_types = Tally::default();
        let mut colors = Tally::default();
        let mut materials = Tally::default();
        let mut tags = Tally::default();

        for item in items {
            for size in item.variant_sizes() {
                sizes.add(size);
            }
            if let Some(value) = item.structured(StructuredKey::Type) {
                product_types.add(&value);
            }
            if let Some(value) = item.structured(StructuredKey::Color) {
                colors.add(&value);
            }
            if let Some(value) = item.structured(StructuredKey::Material) {
                materials.add(&value);
            }
            for tag in item.tags.iter().filter(|t| is_free_tag(t)) {
                tags.add(tag);
            }
        }

        let mut tags = tags.ranked();
        tags.truncate(FREE_TAG_LIMIT);

        Self {
            price: price_bounds(items),
            sizes: sizes.ranked(),
            product_types: product_types.ranked(),
            colors: colors.ranked(),
            materials: materials.ranked(),
            tags,
        }
    }

    /// Whether any checkbox facet has values to show.
    #[must_use]
    pub fn has_option_facets(&self) -> bool {
        !(self.sizes.is_empty()
            && self.product_types.is_empty()
            && self.colors.is_empty()
            && self.materials.is_empty())
    }
}

fn price_bounds(items: &[CatalogItem]) -> Option<PriceBounds> {
    let mut prices = items.iter().filter_map(|item| item.price.as_ref());
    let first = prices.next()?;
    let (min, max) = prices.fold((first.amount, first.amount), |(lo, hi), p| {
        (lo.min(p.amount), hi.max(p.amount))
    });

    // A zero-width range is not worth a slider.
    (min != max).then(|| PriceBounds {
        min,
        max,
        currency_code: first.currency_code.clone(),
    })
}

/// Insertion-ordered counter.
#[derive(Default)]
struct Tally {
    order: Vec<FacetValue>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn add(&mut self, value: &str) {
        if let Some(&i) = self.index.get(value) {
            if let Some(entry) = self.order.get_mut(i) {
                entry.count += 1;
            }
        } else {
            self.index.insert(value.to_string(), self.order.len());
            self.order.push(FacetValue {
                value: value.to_string(),
                count: 1,
            });
        }
    }

    fn ranked(mut self) -> Vec<FacetValue> {
        // Stable: equal counts keep encounter order.
        self.order.sort_by(|a, b| b.count.cmp(&a.count));
        self.order
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{SelectedOption, Variant};
    use crate::types::Price;

    fn item(id: &str, price: &str, tags: &[&str], sizes: &[&str]) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            handle: id.to_string(),
            title: id.to_string(),
            tags: tags.iter().map(ToString::to_string).collect(),
            price: Price::parse(price, "USD"),
            created_at: None,
            variants: sizes
                .iter()
                .enumerate()
                .map(|(i, size)| Variant {
                    id: format!("{id}-{i}"),
                    available_for_sale: true,
                    options: vec![SelectedOption::new("Size", *size)],
                })
                .collect(),
            image: None,
        }
    }

    fn pairs(values: &[FacetValue]) -> Vec<(&str, usize)> {
        values.iter().map(|v| (v.value.as_str(), v.count)).collect()
    }

    #[test]
    fn test_structured_facets_count_once_per_item() {
        let items = vec![
            item("1", "10", &["type:jacket", "type:coat", "color:blue"], &[]),
            item("2", "20", &["type:coat", "colour:red"], &[]),
            item("3", "30", &["Type: coat", "material:wool"], &[]),
        ];
        let facets = Facets::from_items(&items);
        assert_eq!(pairs(&facets.product_types), [("coat", 2), ("jacket", 1)]);
        assert_eq!(pairs(&facets.colors), [("blue", 1), ("red", 1)]);
        assert_eq!(pairs(&facets.materials), [("wool", 1)]);
    }

    #[test]
    fn test_size_facet_counts_per_variant() {
        let items = vec![
            item("1", "10", &[], &["M", "M", "L"]),
            item("2", "20", &[], &["S", "M"]),
        ];
        let facets = Facets::from_items(&items);
        assert_eq!(pairs(&facets.sizes), [("M", 3), ("L", 1), ("S", 1)]);
    }

    #[test]
    fn test_size_option_name_is_case_insensitive() {
        let mut shirt = item("1", "10", &[], &[]);
        shirt.variants.push(Variant {
            id: "v".to_string(),
            available_for_sale: false,
            options: vec![
                SelectedOption::new("Colour", "Red"),
                SelectedOption::new("SIZE", "XL"),
            ],
        });
        let facets = Facets::from_items(&[shirt]);
        assert_eq!(pairs(&facets.sizes), [("XL", 1)]);
    }

    #[test]
    fn test_free_tags_top_six_ties_in_encounter_order() {
        let items = vec![
            item("1", "10", &["a", "b", "c", "d", "e", "f", "g", "type:x"], &[]),
            item("2", "20", &["g", "f"], &[]),
        ];
        let facets = Facets::from_items(&items);
        assert_eq!(
            pairs(&facets.tags),
            [("f", 2), ("g", 2), ("a", 1), ("b", 1), ("c", 1), ("d", 1)]
        );
    }

    #[test]
    fn test_price_bounds() {
        let items = vec![
            item("1", "25.50", &[], &[]),
            item("2", "9.99", &[], &[]),
            item("3", "not-a-price", &[], &[]),
        ];
        let bounds = Facets::from_items(&items).price.unwrap();
        assert_eq!(bounds.min, Decimal::new(999, 2));
        assert_eq!(bounds.max, Decimal::new(2550, 2));
        assert_eq!(bounds.min_display(), "$9.99");
    }

    #[test]
    fn test_price_facet_omitted_for_single_price() {
        let items = vec![item("1", "40", &[], &[]), item("2", "40.00", &[], &[])];
        assert!(Facets::from_items(&items).price.is_none());
        assert!(Facets::from_items(&[]).price.is_none());
    }

    #[test]
    fn test_empty_catalog() {
        let facets = Facets::from_items(&[]);
        assert_eq!(facets, Facets::default());
        assert!(!facets.has_option_facets());
    }
}
