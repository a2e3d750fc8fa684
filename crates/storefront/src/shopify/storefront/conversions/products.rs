//! Product type conversion functions.

use crate::shopify::types::{
    Image, Money, PageInfo, PriceRange, Product, ProductConnection, ProductOption,
    ProductVariant, SelectedOption, Seo,
};

use super::super::queries::fragments::{self, ProductFields, VariantFields};
use super::super::queries::{get_product_by_handle, get_products};

// =============================================================================
// Shared fragment conversions
// =============================================================================

pub fn convert_image(i: fragments::ImageFields) -> Image {
    Image {
        id: i.id,
        url: i.url,
        alt_text: i.alt_text,
        width: i.width,
        height: i.height,
    }
}

pub fn convert_seo(s: fragments::Seo) -> Seo {
    Seo {
        title: s.title,
        description: s.description,
    }
}

pub fn convert_page_info(p: fragments::PageInfo) -> PageInfo {
    PageInfo {
        has_next_page: p.has_next_page,
        end_cursor: p.end_cursor,
    }
}

fn convert_money(m: fragments::Money) -> Money {
    Money {
        amount: m.amount,
        currency_code: m.currency_code,
    }
}

fn convert_price_range(r: fragments::PriceRange) -> PriceRange {
    PriceRange {
        min_variant_price: convert_money(r.min_variant_price),
        max_variant_price: convert_money(r.max_variant_price),
    }
}

fn convert_variant(v: VariantFields) -> ProductVariant {
    ProductVariant {
        id: v.id,
        title: v.title,
        available_for_sale: v.available_for_sale,
        price: convert_money(v.price),
        compare_at_price: v.compare_at_price.map(convert_money),
        selected_options: v
            .selected_options
            .into_iter()
            .map(|o| SelectedOption {
                name: o.name,
                value: o.value,
            })
            .collect(),
        image: v.image.map(convert_image),
    }
}

/// Convert the list selection of a product.
///
/// Fields only the detail query selects are left empty.
pub fn convert_product_fields(fields: ProductFields) -> Product {
    let featured_image = fields.featured_image.map(convert_image);

    Product {
        id: fields.id,
        handle: fields.handle,
        title: fields.title,
        description: fields.description,
        description_html: String::new(),
        available_for_sale: fields.available_for_sale,
        kind: fields.product_type,
        vendor: fields.vendor,
        tags: fields.tags,
        created_at: fields.created_at,
        updated_at: fields.updated_at,
        seo: None,
        price_range: convert_price_range(fields.price_range),
        images: featured_image.iter().cloned().collect(),
        featured_image,
        options: vec![],
        variants: fields.variants.into_nodes().map(convert_variant).collect(),
    }
}

// =============================================================================
// get_product_by_handle conversions
// =============================================================================

pub fn convert_product(product: get_product_by_handle::Product) -> Product {
    let images: Vec<Image> = product.images.into_nodes().map(convert_image).collect();

    Product {
        description_html: product.description_html,
        seo: product.seo.map(convert_seo),
        options: product
            .options
            .into_iter()
            .map(|o| ProductOption {
                id: o.id,
                name: o.name,
                values: o.values,
            })
            .collect(),
        images,
        ..convert_product_fields(product.fields)
    }
}

// =============================================================================
// get_products conversions
// =============================================================================

pub fn convert_product_connection(conn: get_products::Products) -> ProductConnection {
    ProductConnection {
        products: conn
            .edges
            .into_iter()
            .map(|e| convert_product_fields(e.node))
            .collect(),
        page_info: convert_page_info(conn.page_info),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product_json() -> serde_json::Value {
        serde_json::json!({
            "id": "gid://shopify/Product/7",
            "handle": "merino-beanie",
            "title": "Merino Beanie",
            "description": "Soft rib knit",
            "availableForSale": true,
            "productType": "Accessories",
            "vendor": "Kittaly",
            "tags": ["type:Hat", "material:Merino", "gift"],
            "createdAt": "2025-10-02T08:30:00Z",
            "updatedAt": "2025-10-05T08:30:00Z",
            "priceRange": {
                "minVariantPrice": { "amount": "24.0", "currencyCode": "GBP" },
                "maxVariantPrice": { "amount": "28.0", "currencyCode": "GBP" }
            },
            "featuredImage": { "id": "img-1", "url": "https://cdn.shopify.com/beanie.jpg", "altText": null, "width": 800, "height": 800 },
            "variants": { "edges": [
                { "node": {
                    "id": "v1", "title": "One Size", "availableForSale": true,
                    "price": { "amount": "24.0", "currencyCode": "GBP" },
                    "compareAtPrice": { "amount": "30.0", "currencyCode": "GBP" },
                    "selectedOptions": [{ "name": "Size", "value": "One Size" }],
                    "image": null
                } }
            ] }
        })
    }

    #[test]
    fn test_convert_product_fields() {
        let fields: ProductFields = serde_json::from_value(product_json()).unwrap();
        let product = convert_product_fields(fields);

        assert_eq!(product.handle, "merino-beanie");
        assert_eq!(product.kind, "Accessories");
        assert_eq!(product.price_range.max_variant_price.amount, "28.0");
        assert_eq!(product.price_range.max_variant_price.currency_code, "GBP");
        assert_eq!(product.images.len(), 1);
        assert_eq!(product.variants[0].selected_options[0].value, "One Size");
        assert_eq!(
            product.variants[0].compare_at_price.as_ref().map(|m| m.amount.as_str()),
            Some("30.0")
        );
        assert!(product.description_html.is_empty());
    }

    #[test]
    fn test_convert_product_detail_overrides_list_fields() {
        let mut json = product_json();
        json["descriptionHtml"] = "<p>Soft rib knit</p>".into();
        json["seo"] = serde_json::json!({ "title": "Beanie", "description": null });
        json["options"] = serde_json::json!([{ "id": "o1", "name": "Size", "values": ["One Size"] }]);
        json["images"] = serde_json::json!({ "edges": [
            { "node": { "id": "a", "url": "https://cdn.shopify.com/a.jpg", "altText": "Front", "width": null, "height": null } },
            { "node": { "id": "b", "url": "https://cdn.shopify.com/b.jpg", "altText": "Back", "width": null, "height": null } }
        ] });

        let raw: get_product_by_handle::Product = serde_json::from_value(json).unwrap();
        let product = convert_product(raw);

        assert_eq!(product.description_html, "<p>Soft rib knit</p>");
        assert_eq!(product.images.len(), 2);
        assert_eq!(product.options[0].name, "Size");
        assert_eq!(product.seo.unwrap().title.as_deref(), Some("Beanie"));
    }
}
