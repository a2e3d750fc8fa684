//! Conversion from Shopify products to filterable catalog items.

use chrono::{DateTime, Utc};
use kittaly_core::Price;
use kittaly_core::catalog::{CatalogItem, SelectedOption, Variant};

use crate::shopify::{Product, ProductVariant};

impl From<&Product> for CatalogItem {
    fn from(product: &Product) -> Self {
        let max = &product.price_range.max_variant_price;

        Self {
            id: product.id.clone(),
            handle: product.handle.clone(),
            title: product.title.clone(),
            tags: product.tags.clone(),
            price: Price::parse(&max.amount, &max.currency_code),
            created_at: product.created_at.as_deref().and_then(parse_timestamp),
            variants: product.variants.iter().map(convert_variant).collect(),
            image: product.featured_image.as_ref().map(|i| i.url.clone()),
        }
    }
}

fn convert_variant(variant: &ProductVariant) -> Variant {
    Variant {
        id: variant.id.clone(),
        available_for_sale: variant.available_for_sale,
        options: variant
            .selected_options
            .iter()
            .map(|o| SelectedOption::new(o.name.clone(), o.value.clone()))
            .collect(),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Catalog items for a product list, in the same order.
#[must_use]
pub fn catalog_items(products: &[Product]) -> Vec<CatalogItem> {
    products.iter().map(CatalogItem::from).collect()
}
