//! Filtered product listing shared by collection and search pages.
//!
//! Every link on the page is a pure transform of the current query string:
//! toggling a facet value, picking a sort, or clearing all filters produces
//! a new URL and the server recomputes the whole view from it.

use kittaly_core::catalog::{
    CatalogItem, Dimension, FacetValue, Facets, FilterState, Listing, ListingStatus,
    PRICE_COMMIT_DELAY, PriceControl, PriceRange, QueryParams, SortKey, params,
};

/// Slider granularity. Prices carry two decimal places, so any pair of
/// bounds is reachable exactly and an untouched thumb resubmits its bound.
pub const PRICE_STEP: &str = "0.01";

/// Product card data for templates.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub handle: String,
    pub title: String,
    pub price: Option<String>,
    pub image: Option<String>,
}

impl From<&CatalogItem> for ProductCardView {
    fn from(item: &CatalogItem) -> Self {
        Self {
            handle: item.handle.clone(),
            title: item.title.clone(),
            price: item.price.as_ref().map(kittaly_core::Price::display),
            image: item.image.clone(),
        }
    }
}

/// A facet value rendered as a toggle link.
#[derive(Debug, Clone)]
pub struct FacetOptionView {
    pub value: String,
    pub count: usize,
    pub selected: bool,
    pub href: String,
}

#[derive(Debug, Clone)]
pub struct FacetGroupView {
    pub title: &'static str,
    pub param: &'static str,
    pub options: Vec<FacetOptionView>,
}

/// A query parameter the slider form must carry through unchanged.
#[derive(Debug, Clone)]
pub struct HiddenField {
    pub name: String,
    pub value: String,
}

/// Dual-thumb price slider.
#[derive(Debug, Clone)]
pub struct PriceSliderView {
    pub min: String,
    pub max: String,
    pub current_min: String,
    pub current_max: String,
    pub min_display: String,
    pub max_display: String,
    pub currency_symbol: String,
    pub step: &'static str,
    /// Debounce for the HTMX `delay:` trigger modifier.
    pub delay_ms: u128,
    pub hidden: Vec<HiddenField>,
}

#[derive(Debug, Clone)]
pub struct SortOptionView {
    pub label: &'static str,
    pub href: String,
    pub selected: bool,
}

/// Everything a listing page renders below the heading.
#[derive(Debug, Clone)]
pub struct ListingView {
    pub path: String,
    pub products: Vec<ProductCardView>,
    pub total: usize,
    pub groups: Vec<FacetGroupView>,
    pub tag_pills: Vec<FacetOptionView>,
    pub price: Option<PriceSliderView>,
    pub sort_options: Vec<SortOptionView>,
    pub sort_label: &'static str,
    /// `None` when nothing is filtered.
    pub clear_href: Option<String>,
    /// The URL this view is canonically reached by.
    pub canonical_href: String,
    status: ListingStatus,
}

impl ListingView {
    /// Filter, sort and facet `items` for the page at `path`.
    #[must_use]
    pub fn build(path: &str, items: &[CatalogItem], query: &QueryParams) -> Self {
        let facets = Facets::from_items(items);
        let mut state = FilterState::from_query(query);

        let control = facets
            .price
            .as_ref()
            .map(|bounds| PriceControl::new(PriceRange::from(bounds), &state.price));
        if let Some(control) = &control {
            state = state.with_price(control.settle(&state.price));
        }

        let listing = Listing::build(items, &state);
        let href = |next: &FilterState| next.apply_to(query).href(path);

        let groups = Dimension::ALL
            .into_iter()
            .filter(|d| *d != Dimension::Tags)
            .filter_map(|dimension| {
                let values = facet_values(&facets, dimension);
                (!values.is_empty()).then(|| FacetGroupView {
                    title: dimension.title(),
                    param: dimension.param(),
                    options: options(values, dimension, &state, &href),
                })
            })
            .collect();

        let tag_pills = options(&facets.tags, Dimension::Tags, &state, &href);

        let price = facets.price.as_ref().zip(control.as_ref()).map(|(bounds, control)| {
            let shown = control.display_range();
            PriceSliderView {
                min: bounds.min.normalize().to_string(),
                max: bounds.max.normalize().to_string(),
                current_min: shown.min.max(bounds.min).normalize().to_string(),
                current_max: shown.max.min(bounds.max).normalize().to_string(),
                min_display: bounds.min_display(),
                max_display: bounds.max_display(),
                currency_symbol: bounds.currency_code.symbol().unwrap_or_default().to_string(),
                step: PRICE_STEP,
                delay_ms: PRICE_COMMIT_DELAY.as_millis(),
                hidden: hidden_fields(&state.apply_to(query)),
            }
        });

        let sort_options = SortKey::ALL
            .into_iter()
            .map(|key| SortOptionView {
                label: key.label(),
                href: href(&state.with_sort(key)),
                selected: key == state.sort,
            })
            .collect();

        Self {
            path: path.to_string(),
            products: listing.items.iter().map(|item| ProductCardView::from(*item)).collect(),
            total: listing.total,
            groups,
            tag_pills,
            price,
            sort_options,
            sort_label: state.sort.label(),
            clear_href: state.has_active_filters().then(|| href(&state.cleared())),
            canonical_href: href(&state),
            status: listing.status(),
        }
    }

    #[must_use]
    pub const fn catalog_empty(&self) -> bool {
        matches!(self.status, ListingStatus::CatalogEmpty)
    }

    #[must_use]
    pub const fn no_matches(&self) -> bool {
        matches!(self.status, ListingStatus::NoMatches)
    }

    /// Number of products shown.
    #[must_use]
    pub fn shown(&self) -> usize {
        self.products.len()
    }

    /// Whether the sidebar has anything to show.
    #[must_use]
    pub fn has_sidebar(&self) -> bool {
        self.price.is_some() || !self.groups.is_empty()
    }
}

fn facet_values(facets: &Facets, dimension: Dimension) -> &[FacetValue] {
    match dimension {
        Dimension::Sizes => &facets.sizes,
        Dimension::ProductTypes => &facets.product_types,
        Dimension::Colors => &facets.colors,
        Dimension::Materials => &facets.materials,
        Dimension::Tags => &facets.tags,
    }
}

fn options(
    values: &[FacetValue],
    dimension: Dimension,
    state: &FilterState,
    href: &impl Fn(&FilterState) -> String,
) -> Vec<FacetOptionView> {
    values
        .iter()
        .map(|facet| FacetOptionView {
            value: facet.value.clone(),
            count: facet.count,
            selected: state.is_selected(dimension, &facet.value),
            href: href(&state.toggled(dimension, &facet.value)),
        })
        .collect()
}

/// Parameters the slider form resubmits alongside its own two inputs.
fn hidden_fields(query: &QueryParams) -> Vec<HiddenField> {
    query
        .iter()
        .filter(|(name, _)| *name != params::MIN_PRICE && *name != params::MAX_PRICE)
        .map(|(name, value)| HiddenField {
            name: name.to_string(),
            value: value.to_string(),
        })
        .collect()
}
