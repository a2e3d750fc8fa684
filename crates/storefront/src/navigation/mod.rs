//! Mega-menu composition.
//!
//! A Shopify menu has up to three levels. The mega menu shows the first
//! level in the header; hovering one opens its second level as a column of
//! groups, each with its third-level links and a representative collection
//! image:
//!
//! ```text
//! Women            <- MenuSection
//!   Knitwear       <- MenuGroup (image from /collections/knitwear)
//!     Jumpers      <- NavLink
//!     Cardigans
//!   Accessories
//! Sale             <- highlighted
//! ```
//!
//! Images are best-effort: [`MegaMenu::enrich`] looks each group up once and
//! renders without an image when the lookup fails or finds nothing.

mod images;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::shopify::{Menu, MenuItem};

pub use images::{ImageRequests, ImageSource, ImageState};

/// Path prefixes that address a collection listing.
const COLLECTION_PREFIXES: [&str; 2] = ["/search", "/collections"];

// =============================================================================
// Path helpers
// =============================================================================

/// Reduce a menu URL to a site-relative path.
///
/// Absolute URLs keep their path and query; relative paths pass through.
#[must_use]
pub fn site_path(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => match parsed.query() {
            Some(query) => format!("{}?{query}", parsed.path()),
            None => parsed.path().to_string(),
        },
        Err(_) => url.to_string(),
    }
}

/// The collection handle a menu path points at.
///
/// `/collections/knitwear`, `/search/knitwear/` and
/// `https://shop.example/collections/knitwear` all give `knitwear`. Paths
/// that are not a single collection segment give `None`.
#[must_use]
pub fn collection_handle(path: &str) -> Option<String> {
    let path = site_path(path);
    let path = path.split(['?', '#']).next().unwrap_or_default();

    let rest = COLLECTION_PREFIXES
        .iter()
        .find_map(|prefix| {
            path.strip_prefix(prefix)
                .filter(|rest| rest.is_empty() || rest.starts_with('/'))
        })
        .unwrap_or(path);
    let handle = rest.trim_matches('/');

    (!handle.is_empty() && !handle.contains('/')).then(|| handle.to_string())
}

/// Whether a menu title should be highlighted as a sale link.
#[must_use]
pub fn is_sale(title: &str) -> bool {
    title.to_lowercase().contains("sale")
}

// =============================================================================
// Menu view
// =============================================================================

/// A titled link. `path` is `None` for headings without a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub title: String,
    pub path: Option<String>,
    pub is_sale: bool,
}

impl From<&MenuItem> for NavLink {
    fn from(item: &MenuItem) -> Self {
        Self {
            title: item.title.clone(),
            path: item.url.as_deref().map(site_path),
            is_sale: is_sale(&item.title),
        }
    }
}

/// A second-level entry with its links and optional image.
#[derive(Debug, Clone, Serialize)]
pub struct MenuGroup {
    pub link: NavLink,
    pub links: Vec<NavLink>,
    pub image: Option<String>,
}

/// A top-level header entry.
#[derive(Debug, Clone, Serialize)]
pub struct MenuSection {
    pub link: NavLink,
    pub groups: Vec<MenuGroup>,
}

impl MenuSection {
    #[must_use]
    pub fn has_panel(&self) -> bool {
        !self.groups.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MegaMenu {
    pub sections: Vec<MenuSection>,
}

impl MegaMenu {
    /// Build the view from a Shopify menu. Levels below the third are dropped.
    #[must_use]
    pub fn compose(menu: &Menu) -> Self {
        let sections = menu
            .items
            .iter()
            .map(|top| MenuSection {
                link: NavLink::from(top),
                groups: top
                    .items
                    .iter()
                    .map(|second| MenuGroup {
                        link: NavLink::from(second),
                        links: second.items.iter().map(NavLink::from).collect(),
                        image: None,
                    })
                    .collect(),
            })
            .collect();

        Self { sections }
    }

    /// Paths of every second-level entry, the keys images are looked up by.
    pub fn image_keys(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .flat_map(|section| section.groups.iter())
            .filter_map(|group| group.link.path.as_deref())
    }

    /// Look up images for every group not yet in `requests`, concurrently.
    ///
    /// Failures are logged and recorded as absent. Nothing is retried.
    #[instrument(skip_all)]
    pub async fn enrich<S: ImageSource>(&mut self, source: &S, requests: &mut ImageRequests) {
        let keys: Vec<String> = self
            .image_keys()
            .filter(|key| requests.begin(key))
            .map(ToString::to_string)
            .collect();

        let lookups = keys.iter().map(|key| async move {
            let Some(handle) = collection_handle(key) else {
                return (key, None);
            };
            match source.collection_image(&handle).await {
                Ok(image) => (key, image),
                Err(e) => {
                    debug!(path = %key, error = %e, "Collection image lookup failed");
                    (key, None)
                }
            }
        });

        for (key, image) in join_all(lookups).await {
            requests.resolve(key, image);
        }

        self.apply(requests);
    }

    /// Copy resolved images onto their groups.
    pub fn apply(&mut self, requests: &ImageRequests) {
        for group in self.sections.iter_mut().flat_map(|s| s.groups.iter_mut()) {
            group.image = group
                .link
                .path
                .as_deref()
                .and_then(|path| requests.image(path))
                .map(ToString::to_string);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::shopify::ShopifyError;

    fn item(title: &str, url: Option<&str>, items: Vec<MenuItem>) -> MenuItem {
        MenuItem {
            title: title.to_string(),
            url: url.map(ToString::to_string),
            items,
        }
    }

    fn menu() -> Menu {
        Menu {
            handle: "next-js-frontend-header-menu".to_string(),
            title: "Header".to_string(),
            items: vec![
                item(
                    "Women",
                    Some("https://kittaly.com/collections/women"),
                    vec![
                        item(
                            "Knitwear",
                            Some("https://kittaly.com/search/knitwear"),
                            vec![item("Jumpers", Some("/search/jumpers"), vec![])],
                        ),
                        item("Accessories", Some("/collections/accessories"), vec![]),
                        item("Gift Guide", Some("/pages/gift-guide"), vec![]),
                    ],
                ),
                item(
                    "Men",
                    Some("/collections/men"),
                    vec![item("Knitwear", Some("/search/knitwear"), vec![])],
                ),
                item("Winter Sale", Some("/collections/sale"), vec![]),
            ],
        }
    }

    /// Records every handle it is asked for.
    #[derive(Default)]
    struct FakeSource {
        calls: Mutex<Vec<String>>,
    }

    impl ImageSource for FakeSource {
        async fn collection_image(&self, handle: &str) -> Result<Option<String>, ShopifyError> {
            self.calls.lock().unwrap().push(handle.to_string());
            match handle {
                "knitwear" => Ok(Some("https://cdn.shopify.com/knitwear.jpg".to_string())),
                "accessories" => Err(ShopifyError::RateLimited(2)),
                _ => Ok(None),
            }
        }
    }

    #[test]
    fn test_collection_handle() {
        assert_eq!(collection_handle("/collections/knitwear"), Some("knitwear".to_string()));
        assert_eq!(collection_handle("/search/knitwear/"), Some("knitwear".to_string()));
        assert_eq!(
            collection_handle("https://kittaly.com/collections/knitwear?sort=best-selling"),
            Some("knitwear".to_string())
        );
        assert_eq!(collection_handle("knitwear"), Some("knitwear".to_string()));
        assert_eq!(collection_handle("/search"), None);
        assert_eq!(collection_handle("/collections/"), None);
        assert_eq!(collection_handle("/pages/about-us"), None);
        assert_eq!(collection_handle(""), None);
    }

    #[test]
    fn test_site_path() {
        assert_eq!(site_path("https://kittaly.com/collections/women"), "/collections/women");
        assert_eq!(site_path("https://kittaly.com/search?q=wool"), "/search?q=wool");
        assert_eq!(site_path("/pages/about"), "/pages/about");
    }

    #[test]
    fn test_is_sale() {
        assert!(is_sale("Winter Sale"));
        assert!(is_sale("SALE"));
        assert!(!is_sale("New In"));
    }

    #[test]
    fn test_compose() {
        let mega = MegaMenu::compose(&menu());
        assert_eq!(mega.sections.len(), 3);

        let women = &mega.sections[0];
        assert_eq!(women.link.path.as_deref(), Some("/collections/women"));
        assert!(women.has_panel());
        assert_eq!(women.groups[0].link.path.as_deref(), Some("/search/knitwear"));
        assert_eq!(women.groups[0].links[0].title, "Jumpers");

        let sale = &mega.sections[2];
        assert!(sale.link.is_sale);
        assert!(!sale.has_panel());
    }

    #[tokio::test]
    async fn test_enrich_requests_each_path_once() {
        let source = FakeSource::default();
        let mut requests = ImageRequests::new();
        let mut mega = MegaMenu::compose(&menu());

        mega.enrich(&source, &mut requests).await;

        let mut calls = source.calls.lock().unwrap().clone();
        calls.sort();
        assert_eq!(calls, ["accessories", "knitwear"]);

        assert_eq!(
            mega.sections[0].groups[0].image.as_deref(),
            Some("https://cdn.shopify.com/knitwear.jpg")
        );
        assert_eq!(
            mega.sections[1].groups[0].image.as_deref(),
            Some("https://cdn.shopify.com/knitwear.jpg")
        );
        assert_eq!(mega.sections[0].groups[1].image, None);
        assert_eq!(requests.state("/collections/accessories"), Some(&ImageState::Absent));
        assert_eq!(requests.state("/pages/gift-guide"), Some(&ImageState::Absent));
    }

    #[tokio::test]
    async fn test_enrich_twice_does_not_refetch() {
        let source = FakeSource::default();
        let mut requests = ImageRequests::new();

        let mut first = MegaMenu::compose(&menu());
        first.enrich(&source, &mut requests).await;
        let mut second = MegaMenu::compose(&menu());
        second.enrich(&source, &mut requests).await;

        assert_eq!(source.calls.lock().unwrap().len(), 2);
        assert_eq!(
            second.sections[0].groups[0].image,
            first.sections[0].groups[0].image
        );
    }
}
