//! Filter state and the filtering pipeline.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use super::query::{QueryParams, params};
use super::sort::{SortKey, sort_items};
use super::tags::StructuredKey;
use super::CatalogItem;

/// A multi-value filter dimension backed by a comma-joined query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Sizes,
    ProductTypes,
    Colors,
    Materials,
    Tags,
}

impl Dimension {
    pub const ALL: [Self; 5] = [
        Self::Sizes,
        Self::ProductTypes,
        Self::Colors,
        Self::Materials,
        Self::Tags,
    ];

    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::Sizes => params::SIZES,
            Self::ProductTypes => params::PRODUCT_TYPES,
            Self::Colors => params::COLORS,
            Self::Materials => params::MATERIALS,
            Self::Tags => params::TAGS,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Sizes => "Size",
            Self::ProductTypes => "Product Type",
            Self::Colors => "Colour",
            Self::Materials => "Material",
            Self::Tags => "Tags",
        }
    }
}

/// Optional inclusive price bounds. A missing side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriceFilter {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl PriceFilter {
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    #[must_use]
    pub fn contains(&self, amount: Decimal) -> bool {
        self.min.is_none_or(|min| amount >= min) && self.max.is_none_or(|max| amount <= max)
    }
}

/// The complete set of active facet selections and the sort choice.
///
/// Reconstructible from the query string alone; see [`FilterState::from_query`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub price: PriceFilter,
    pub sizes: Vec<String>,
    pub product_types: Vec<String>,
    pub colors: Vec<String>,
    pub materials: Vec<String>,
    pub tags: Vec<String>,
    pub sort: SortKey,
}

impl FilterState {
    /// Parse filter state from query parameters.
    ///
    /// Malformed values are ignored: a non-numeric price bound is treated as
    /// absent, an unknown sort as the default.
    #[must_use]
    pub fn from_query(query: &QueryParams) -> Self {
        Self {
            price: PriceFilter {
                min: parse_decimal(query.get(params::MIN_PRICE)),
                max: parse_decimal(query.get(params::MAX_PRICE)),
            },
            sizes: query.get_list(params::SIZES),
            product_types: query.get_list(params::PRODUCT_TYPES),
            colors: query.get_list(params::COLORS),
            materials: query.get_list(params::MATERIALS),
            tags: query.get_list(params::TAGS),
            sort: SortKey::from_query(query.get(params::SORT)),
        }
    }

    /// Write this state into `base`, keeping unrelated parameters in place.
    #[must_use]
    pub fn apply_to(&self, base: &QueryParams) -> QueryParams {
        let mut query = base.clone();
        for dimension in Dimension::ALL {
            query = query.with_list(dimension.param(), self.selected(dimension));
        }
        query = match self.price.min {
            Some(min) => query.with(params::MIN_PRICE, min.normalize().to_string()),
            None => query.without(params::MIN_PRICE),
        };
        query = match self.price.max {
            Some(max) => query.with(params::MAX_PRICE, max.normalize().to_string()),
            None => query.without(params::MAX_PRICE),
        };
        match self.sort.as_query() {
            Some(sort) => query.with(params::SORT, sort),
            None => query.without(params::SORT),
        }
    }

    /// Encode as a standalone query.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        self.apply_to(&QueryParams::new())
    }

    #[must_use]
    pub fn selected(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Sizes => &self.sizes,
            Dimension::ProductTypes => &self.product_types,
            Dimension::Colors => &self.colors,
            Dimension::Materials => &self.materials,
            Dimension::Tags => &self.tags,
        }
    }

    fn selected_mut(&mut self, dimension: Dimension) -> &mut Vec<String> {
        match dimension {
            Dimension::Sizes => &mut self.sizes,
            Dimension::ProductTypes => &mut self.product_types,
            Dimension::Colors => &mut self.colors,
            Dimension::Materials => &mut self.materials,
            Dimension::Tags => &mut self.tags,
        }
    }

    #[must_use]
    pub fn is_selected(&self, dimension: Dimension, value: &str) -> bool {
        self.selected(dimension).iter().any(|v| v == value)
    }

    /// Copy with `value` added to (or removed from) a dimension.
    #[must_use]
    pub fn toggled(&self, dimension: Dimension, value: &str) -> Self {
        let mut next = self.clone();
        let values = next.selected_mut(dimension);
        if let Some(pos) = values.iter().position(|v| v == value) {
            values.remove(pos);
        } else {
            values.push(value.to_string());
        }
        next
    }

    /// Copy with new price bounds.
    #[must_use]
    pub fn with_price(&self, price: PriceFilter) -> Self {
        Self {
            price,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_sort(&self, sort: SortKey) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }

    /// Copy with every filter reset; the sort choice is kept.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self {
            sort: self.sort,
            ..Self::default()
        }
    }

    /// Whether any filter (not counting sort) is active.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.price.is_unbounded() || Dimension::ALL.iter().any(|d| !self.selected(*d).is_empty())
    }

    /// Whether `item` passes every active predicate.
    #[must_use]
    pub fn matches(&self, item: &CatalogItem) -> bool {
        self.matches_tags(item)
            && self.matches_price(item)
            && self.matches_sizes(item)
            && matches_structured(&self.product_types, item, StructuredKey::Type)
            && matches_structured(&self.colors, item, StructuredKey::Color)
            && matches_structured(&self.materials, item, StructuredKey::Material)
    }

    fn matches_tags(&self, item: &CatalogItem) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|tag| item.has_tag(tag))
    }

    fn matches_price(&self, item: &CatalogItem) -> bool {
        if self.price.is_unbounded() {
            return true;
        }
        item.price
            .as_ref()
            .is_some_and(|price| self.price.contains(price.amount))
    }

    fn matches_sizes(&self, item: &CatalogItem) -> bool {
        self.sizes.is_empty()
            || item
                .variants
                .iter()
                .flat_map(|variant| variant.options.iter())
                .any(|opt| opt.name.eq_ignore_ascii_case("size") && self.sizes.contains(&opt.value))
    }
}

fn matches_structured(selected: &[String], item: &CatalogItem, key: StructuredKey) -> bool {
    if selected.is_empty() {
        return true;
    }
    item.structured(key)
        .is_some_and(|value| selected.contains(&value))
}

fn parse_decimal(raw: Option<&str>) -> Option<Decimal> {
    raw.and_then(|s| Decimal::from_str(s.trim()).ok())
}

/// Items passing every predicate, in source order.
///
/// Predicates run in a fixed order (tags, price, size, type, colour,
/// material); each is a no-op when its selection is empty.
#[must_use]
pub fn filter_items<'a>(items: &'a [CatalogItem], state: &FilterState) -> Vec<&'a CatalogItem> {
    items.iter().filter(|item| state.matches(item)).collect()
}

/// Outcome of a listing, distinguishing an empty catalog from no matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    CatalogEmpty,
    NoMatches,
    Matches(usize),
}

/// A filtered and sorted view over a catalog.
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    pub items: Vec<&'a CatalogItem>,
    pub total: usize,
}

impl<'a> Listing<'a> {
    /// Filter, then sort.
    #[must_use]
    pub fn build(items: &'a [CatalogItem], state: &FilterState) -> Self {
        let mut view = filter_items(items, state);
        sort_items(&mut view, state.sort);
        Self {
            items: view,
            total: items.len(),
        }
    }

    #[must_use]
    pub fn status(&self) -> ListingStatus {
        match (self.total, self.items.len()) {
            (0, _) => ListingStatus::CatalogEmpty,
            (_, 0) => ListingStatus::NoMatches,
            (_, n) => ListingStatus::Matches(n),
        }
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
                .map(|size| Variant {
                    id: format!("{id}-{size}"),
                    available_for_sale: true,
                    options: vec![SelectedOption::new("Size", *size)],
                })
                .collect(),
            image: None,
        }
    }

    fn ids(items: &[&CatalogItem]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn test_from_query_parses_every_parameter() {
        let query = QueryParams::parse(
            "minPrice=15&maxPrice=35.5&sizes=S,M&productTypes=jacket&colors=blue,red&materials=wool&tags=new&sort=price-descending",
        );
        let state = FilterState::from_query(&query);
        assert_eq!(state.price.min, Some(Decimal::new(15, 0)));
        assert_eq!(state.price.max, Some(Decimal::new(355, 1)));
        assert_eq!(state.sizes, ["S", "M"]);
        assert_eq!(state.product_types, ["jacket"]);
        assert_eq!(state.colors, ["blue", "red"]);
        assert_eq!(state.materials, ["wool"]);
        assert_eq!(state.tags, ["new"]);
        assert_eq!(state.sort, SortKey::PriceDescending);
    }

    #[test]
    fn test_malformed_price_is_ignored() {
        let state = FilterState::from_query(&QueryParams::parse("minPrice=cheap&maxPrice=50"));
        assert_eq!(state.price.min, None);
        assert_eq!(state.price.max, Some(Decimal::new(50, 0)));
        assert!(state.has_active_filters());
    }

    #[test]
    fn test_apply_to_roundtrip_keeps_unrelated_keys() {
        let base = QueryParams::parse("q=coat&colors=blue&page=2");
        let state = FilterState::from_query(&base)
            .toggled(Dimension::Colors, "red")
            .toggled(Dimension::Sizes, "M")
            .with_price(PriceFilter {
                min: Some(Decimal::new(1000, 2)),
                max: None,
            });
        let query = state.apply_to(&base);
        assert_eq!(
            query.to_query_string(),
            "q=coat&colors=blue%2Cred&page=2&sizes=M&minPrice=10"
        );
        assert_eq!(FilterState::from_query(&query), state);
    }

    #[test]
    fn test_toggle_removes_existing_value() {
        let state = FilterState::default()
            .toggled(Dimension::Tags, "sale")
            .toggled(Dimension::Tags, "new")
            .toggled(Dimension::Tags, "sale");
        assert_eq!(state.tags, ["new"]);
        assert!(state.is_selected(Dimension::Tags, "new"));
        assert!(!state.is_selected(Dimension::Tags, "sale"));
    }

    #[test]
    fn test_cleared_keeps_sort_only() {
        let query = QueryParams::parse("sizes=M&minPrice=5&sort=created-descending&tags=x");
        let cleared = FilterState::from_query(&query).cleared();
        assert!(!cleared.has_active_filters());
        assert_eq!(cleared.sort, SortKey::Newest);
        assert_eq!(cleared.to_query().to_query_string(), "sort=created-descending");
    }

    #[test]
    fn test_price_range_inclusive() {
        let items = ["10", "20", "30", "40", "50"]
            .iter()
            .map(|p| item(p, p, &[], &[]))
            .collect::<Vec<_>>();
        let state = FilterState::from_query(&QueryParams::parse("minPrice=20&maxPrice=40"));
        assert_eq!(ids(&filter_items(&items, &state)), ["20", "30", "40"]);

        let state = FilterState::from_query(&QueryParams::parse("maxPrice=20"));
        assert_eq!(ids(&filter_items(&items, &state)), ["10", "20"]);
    }

    #[test]
    fn test_unpriced_item_excluded_only_when_price_active() {
        let items = vec![item("priced", "10", &[], &[]), item("unpriced", "n/a", &[], &[])];
        assert_eq!(filter_items(&items, &FilterState::default()).len(), 2);
        let state = FilterState::from_query(&QueryParams::parse("minPrice=0"));
        assert_eq!(ids(&filter_items(&items, &state)), ["priced"]);
    }

    #[test]
    fn test_type_filter_excludes_untyped_items() {
        let items = vec![
            item("a", "10", &["type:jacket"], &[]),
            item("b", "10", &["bestseller"], &[]),
            item("c", "10", &["type:coat"], &[]),
        ];
        let state = FilterState::default().toggled(Dimension::ProductTypes, "jacket");
        assert_eq!(ids(&filter_items(&items, &state)), ["a"]);
    }

    #[test]
    fn test_size_filter_matches_any_variant() {
        let items = vec![
            item("a", "10", &[], &["S", "M"]),
            item("b", "10", &[], &["L"]),
            item("c", "10", &[], &[]),
        ];
        let state = FilterState::default()
            .toggled(Dimension::Sizes, "M")
            .toggled(Dimension::Sizes, "L");
        assert_eq!(ids(&filter_items(&items, &state)), ["a", "b"]);
    }

    #[test]
    fn test_dimensions_combine_with_and() {
        let items = vec![
            item("a", "10", &["color:blue", "material:wool"], &[]),
            item("b", "10", &["color:blue", "material:cotton"], &[]),
            item("c", "10", &["color:red", "material:wool"], &[]),
        ];
        let state = FilterState::default()
            .toggled(Dimension::Colors, "blue")
            .toggled(Dimension::Materials, "wool");
        assert_eq!(ids(&filter_items(&items, &state)), ["a"]);
    }

    #[test]
    fn test_listing_status() {
        let items = vec![item("a", "10", &["new"], &[])];
        let all = Listing::build(&items, &FilterState::default());
        assert_eq!(all.status(), ListingStatus::Matches(1));

        let none = Listing::build(&items, &FilterState::default().toggled(Dimension::Tags, "old"));
        assert_eq!(none.status(), ListingStatus::NoMatches);

        let empty = Listing::build(&[], &FilterState::default());
        assert_eq!(empty.status(), ListingStatus::CatalogEmpty);
    }
}
