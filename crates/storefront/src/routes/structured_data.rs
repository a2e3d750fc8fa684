//! schema.org JSON-LD for product and article pages.
//!
//! Each builder returns a `serde_json::Value`; templates embed the output of
//! [`script_body`] inside `<script type="application/ld+json">`.

use serde_json::{Value, json};

use crate::shopify::types::{Article, Product};

/// Serialize for an inline `<script>` element.
///
/// `<` is escaped so text such as `</script>` inside a description cannot
/// close the element early.
#[must_use]
pub fn script_body(value: &Value) -> String {
    value.to_string().replace('<', "\\u003c")
}

/// `Product` with an `AggregateOffer` spanning the variant prices.
#[must_use]
pub fn product(product: &Product, base_url: &str) -> Value {
    let image = product
        .featured_image
        .as_ref()
        .or_else(|| product.images.first())
        .map(|image| image.url.clone());

    let availability = if product.available_for_sale {
        "https://schema.org/InStock"
    } else {
        "https://schema.org/OutOfStock"
    };

    json!({
        "@context": "https://schema.org",
        "@type": "Product",
        "name": product.title,
        "description": product.description,
        "image": image,
        "url": format!("{}/products/{}", base(base_url), product.handle),
        "brand": { "@type": "Brand", "name": product.vendor },
        "offers": {
            "@type": "AggregateOffer",
            "availability": availability,
            "priceCurrency": product.price_range.min_variant_price.currency_code,
            "lowPrice": product.price_range.min_variant_price.amount,
            "highPrice": product.price_range.max_variant_price.amount,
        },
    })
}

/// `BlogPosting` published by the site.
#[must_use]
pub fn article(article: &Article, site_name: &str, base_url: &str) -> Value {
    let url = format!("{}/articles/{}", base(base_url), article.handle);
    let description = article
        .excerpt
        .clone()
        .or_else(|| article.seo.as_ref().and_then(|seo| seo.description.clone()))
        .unwrap_or_else(|| article.title.clone());

    json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": article.title,
        "description": description,
        "image": article.image.as_ref().map(|image| image.url.clone()),
        "datePublished": article.published_at,
        "dateModified": article.published_at,
        "author": {
            "@type": "Person",
            "name": article.author_name.as_deref().unwrap_or(site_name),
        },
        "publisher": {
            "@type": "Organization",
            "name": site_name,
            "url": base(base_url),
        },
        "mainEntityOfPage": { "@type": "WebPage", "@id": url },
    })
}

/// `BreadcrumbList` from `(name, path)` pairs, root first.
#[must_use]
pub fn breadcrumbs(items: &[(&str, &str)], base_url: &str) -> Value {
    let elements: Vec<Value> = items
        .iter()
        .zip(1..)
        .map(|((name, path), position)| {
            json!({
                "@type": "ListItem",
                "position": position,
                "name": name,
                "item": format!("{}{}", base(base_url), path),
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": elements,
    })
}

fn base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}
