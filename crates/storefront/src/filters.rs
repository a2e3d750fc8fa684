//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Width requested from the Shopify CDN for grid and menu images.
const THUMBNAIL_WIDTH: &str = "600";

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Ask the Shopify CDN for a resized copy of an image.
///
/// Usage in templates: `{{ item.image_url|thumbnail }}`
#[askama::filter_fn]
pub fn thumbnail(url: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(sized_image_url(&url.to_string(), THUMBNAIL_WIDTH))
}

/// Set the `width` query parameter, replacing any existing one.
/// Unparseable URLs are returned unchanged.
fn sized_image_url(raw: &str, width: &str) -> String {
    let Ok(mut url) = url::Url::parse(raw) else {
        return raw.to_string();
    };
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "width")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("width", width);
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sized_image_url() {
        assert_eq!(
            sized_image_url("https://cdn.shopify.com/s/files/jumper.jpg?v=17", "600"),
            "https://cdn.shopify.com/s/files/jumper.jpg?v=17&width=600"
        );
        assert_eq!(
            sized_image_url("https://cdn.shopify.com/a.jpg?width=2000", "600"),
            "https://cdn.shopify.com/a.jpg?width=600"
        );
        assert_eq!(sized_image_url("/static/placeholder.svg", "600"), "/static/placeholder.svg");
    }
}
