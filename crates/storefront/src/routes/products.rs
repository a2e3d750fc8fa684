//! Product detail handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use kittaly_core::Price;
use tracing::instrument;

use super::layout::SiteLayout;
use super::listing::ProductCardView;
use super::structured_data;
use crate::catalog::catalog_items;
use crate::error::Result;
use crate::filters;
use crate::shopify::types::{Image, Money, Product as ShopifyProduct};
use crate::state::AppState;

/// Recommendations shown in the "You may also like" strip.
const RELATED_PRODUCT_COUNT: usize = 8;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub handle: String,
    pub title: String,
    pub vendor: String,
    pub description_html: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub available: bool,
    pub images: Vec<ImageView>,
    pub sizes: Vec<SizeView>,
    pub variants: Vec<VariantView>,
}

/// Image display data for templates.
#[derive(Clone)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

/// One value of the size option, struck through when no variant with it
/// can be bought.
#[derive(Clone)]
pub struct SizeView {
    pub value: String,
    pub available: bool,
}

/// Variant display data for templates.
#[derive(Clone)]
pub struct VariantView {
    pub id: String,
    pub title: String,
    pub price: String,
    pub available: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub layout: SiteLayout,
    pub product: ProductView,
    pub related_products: Vec<ProductCardView>,
    /// `Product` JSON-LD.
    pub json_ld: String,
}

// =============================================================================
// Type Conversions
// =============================================================================

/// Format a Shopify `Money` for display, falling back to the raw amount.
fn format_price(money: &Money) -> String {
    Price::parse(&money.amount, &money.currency_code).map_or_else(
        || format!("{} {}", money.amount, money.currency_code),
        |price| price.display(),
    )
}

impl From<&Image> for ImageView {
    fn from(image: &Image) -> Self {
        Self {
            url: image.url.clone(),
            alt: image.alt_text.clone().unwrap_or_default(),
        }
    }
}

impl From<&ShopifyProduct> for ProductView {
    fn from(product: &ShopifyProduct) -> Self {
        let mut images: Vec<ImageView> = product.images.iter().map(ImageView::from).collect();
        if images.is_empty()
            && let Some(featured) = &product.featured_image
        {
            images.push(ImageView::from(featured));
        }

        let mut sizes: Vec<SizeView> = Vec::new();
        for variant in &product.variants {
            let Some(size) = variant
                .selected_options
                .iter()
                .find(|opt| opt.name.eq_ignore_ascii_case("size"))
            else {
                continue;
            };
            match sizes.iter_mut().find(|s| s.value == size.value) {
                Some(existing) => existing.available |= variant.available_for_sale,
                None => sizes.push(SizeView {
                    value: size.value.clone(),
                    available: variant.available_for_sale,
                }),
            }
        }

        // Compare-at prices only make sense against the lowest variant price.
        let lowest = product
            .variants
            .iter()
            .filter_map(|v| {
                Price::parse(&v.price.amount, &v.price.currency_code).map(|p| (p.amount, v))
            })
            .min_by_key(|(amount, _)| *amount)
            .map(|(_, v)| v);

        Self {
            handle: product.handle.clone(),
            title: product.title.clone(),
            vendor: product.vendor.clone(),
            description_html: product.description_html.clone(),
            price: format_price(&product.price_range.min_variant_price),
            compare_at_price: lowest
                .and_then(|v| v.compare_at_price.as_ref())
                .filter(|money| is_markdown(money, &product.price_range.min_variant_price))
                .map(format_price),
            available: product.available_for_sale,
            images,
            sizes,
            variants: product
                .variants
                .iter()
                .map(|v| VariantView {
                    id: v.id.clone(),
                    title: v.title.clone(),
                    price: format_price(&v.price),
                    available: v.available_for_sale,
                })
                .collect(),
        }
    }
}

/// Whether `compare_at` is strictly above `price`.
fn is_markdown(compare_at: &Money, price: &Money) -> bool {
    let compare_at = Price::parse(&compare_at.amount, &compare_at.currency_code);
    let price = Price::parse(&price.amount, &price.currency_code);
    matches!((compare_at, price), (Some(c), Some(p)) if c.amount > p.amount)
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<impl IntoResponse> {
    let layout = SiteLayout::load(&state).await;
    let product = state.storefront().get_product_by_handle(&handle).await?;

    let related_products = state
        .storefront()
        .get_product_recommendations(&product.id)
        .await
        .map_or_else(
            |e| {
                tracing::warn!("Failed to fetch product recommendations: {e}");
                Vec::new()
            },
            |products| related_cards(&products, &product.handle),
        );

    let json_ld = structured_data::script_body(&structured_data::product(
        &product,
        &state.config().base_url,
    ));

    Ok(ProductShowTemplate {
        layout,
        product: ProductView::from(&product),
        related_products,
        json_ld,
    })
}

/// Cards for recommended products, never including the product itself.
fn related_cards(products: &[ShopifyProduct], current: &str) -> Vec<ProductCardView> {
    catalog_items(products)
        .iter()
        .filter(|item| item.handle != current)
        .take(RELATED_PRODUCT_COUNT)
        .map(ProductCardView::from)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::catalog::tests::product;

    #[test]
    fn test_product_view_sizes_merge_availability() {
        let mut raw = product("aran-jumper", "60.00", &[], &["S", "M", "S"]);
        raw.variants[0].available_for_sale = false;
        raw.variants[1].available_for_sale = false;

        let view = ProductView::from(&raw);
        assert_eq!(view.sizes.len(), 2);
        assert_eq!(view.sizes[0].value, "S");
        assert!(view.sizes[0].available, "second S variant is in stock");
        assert!(!view.sizes[1].available);
        assert_eq!(view.price, "£60.00");
    }

    #[test]
    fn test_product_view_falls_back_to_featured_image() {
        let view = ProductView::from(&product("wool-hat", "15.00", &[], &["One Size"]));
        assert_eq!(view.images.len(), 1);
        assert_eq!(view.images[0].url, "https://cdn.shopify.com/wool-hat.jpg");
    }

    #[test]
    fn test_compare_at_price_only_when_higher() {
        let mut raw = product("cable-scarf", "20.00", &[], &["One Size"]);
        raw.variants[0].compare_at_price = Some(Money {
            amount: "30.00".to_string(),
            currency_code: "GBP".to_string(),
        });
        assert_eq!(
            ProductView::from(&raw).compare_at_price.as_deref(),
            Some("£30.00")
        );

        raw.variants[0].compare_at_price = Some(Money {
            amount: "20.00".to_string(),
            currency_code: "GBP".to_string(),
        });
        assert_eq!(ProductView::from(&raw).compare_at_price, None);
    }

    #[test]
    fn test_related_cards_exclude_current_product() {
        let recommended = vec![
            product("wool-hat", "15.00", &[], &["One Size"]),
            product("aran-jumper", "60.00", &[], &["M"]),
            product("cable-scarf", "20.00", &[], &["One Size"]),
        ];
        let cards = related_cards(&recommended, "aran-jumper");
        let handles: Vec<&str> = cards.iter().map(|c| c.handle.as_str()).collect();
        assert_eq!(handles, ["wool-hat", "cable-scarf"]);
        assert_eq!(cards[0].price.as_deref(), Some("£15.00"));
    }

    #[test]
    fn test_product_page_renders_json_ld_and_related_strip() {
        let raw = product("aran-jumper", "60.00", &[], &["M"]);
        let html = ProductShowTemplate {
            layout: SiteLayout::default(),
            product: ProductView::from(&raw),
            related_products: related_cards(
                &[product("wool-hat", "15.00", &[], &["One Size"])],
                &raw.handle,
            ),
            json_ld: structured_data::script_body(&structured_data::product(
                &raw,
                "https://kittaly.com",
            )),
        }
        .render()
        .unwrap();

        assert!(html.contains(r#""@type":"Product""#));
        assert!(html.contains("You May Also Like"));
        assert!(html.contains(r#"href="/products/wool-hat""#));
    }

    #[test]
    fn test_unpriced_variant_is_not_the_lowest() {
        let mut raw = product("aran-jumper", "60.00", &[], &["S", "M"]);
        raw.variants[0].price.amount = "call us".to_string();
        raw.variants[1].compare_at_price = Some(Money {
            amount: "80.00".to_string(),
            currency_code: "GBP".to_string(),
        });
        assert_eq!(
            ProductView::from(&raw).compare_at_price.as_deref(),
            Some("£80.00")
        );
    }
}
