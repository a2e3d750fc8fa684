//! Collection and search listing handlers.
//!
//! Both list a set of products through the same faceted filter. The catalog
//! is fetched once (up to `catalog_page_size` products) and everything else
//! is derived locally from the query string.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use kittaly_core::catalog::QueryParams;
use tracing::instrument;

use super::layout::SiteLayout;
use super::listing::ListingView;
use crate::catalog::catalog_items;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::shopify::ShopifyError;
use crate::shopify::types::Collection as ShopifyCollection;
use crate::state::AppState;

/// Collections shown on the index page.
const COLLECTIONS_PER_PAGE: i64 = 50;

/// Request header HTMX sets on its own requests.
const HX_REQUEST: &str = "hx-request";

/// Response header telling HTMX which URL to record in history.
const HX_PUSH_URL: &str = "HX-Push-Url";

/// Collection display data for templates.
#[derive(Clone)]
pub struct CollectionView {
    pub handle: String,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl From<&ShopifyCollection> for CollectionView {
    fn from(collection: &ShopifyCollection) -> Self {
        Self {
            handle: collection.handle.clone(),
            title: collection.title.clone(),
            description: if collection.description.is_empty() {
                None
            } else {
                Some(collection.description.clone())
            },
            image: collection.image.as_ref().map(|img| img.url.clone()),
        }
    }
}

/// Collection index page template.
#[derive(Template, WebTemplate)]
#[template(path = "collections/index.html")]
pub struct CollectionsIndexTemplate {
    pub layout: SiteLayout,
    pub collections: Vec<CollectionView>,
}

/// Filtered listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "collections/show.html")]
pub struct ListingTemplate {
    pub layout: SiteLayout,
    pub heading: String,
    pub description: Option<String>,
    pub listing: ListingView,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the collection index.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Response {
    let layout = SiteLayout::load(&state).await;

    let collections = state
        .storefront()
        .get_collections(COLLECTIONS_PER_PAGE, None)
        .await
        .map_or_else(
            |e| {
                tracing::error!("Failed to fetch collections: {e}");
                Vec::new()
            },
            |connection| {
                connection
                    .collections
                    .iter()
                    .map(CollectionView::from)
                    .collect()
            },
        );

    CollectionsIndexTemplate {
        layout,
        collections,
    }
    .into_response()
}

/// Display a collection with its filter sidebar.
#[instrument(skip(state, headers))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Result<Response> {
    render_collection(&state, &handle, &format!("/collections/{handle}"), raw, &headers).await
}

/// Display every product with the same filters as a collection.
#[instrument(skip(state, headers))]
pub async fn search(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Result<Response> {
    let layout = SiteLayout::load(&state).await;
    let connection = state
        .storefront()
        .get_products(state.site().catalog_page_size, None, None)
        .await?;

    let query = QueryParams::parse(raw.as_deref().unwrap_or_default());
    let listing = ListingView::build("/search", &catalog_items(&connection.products), &query);

    Ok(respond(
        &headers,
        ListingTemplate {
            layout,
            heading: "All Products".to_string(),
            description: None,
            listing,
        },
    ))
}

/// `/search/{handle}` is the menu's spelling of a collection page.
#[instrument(skip(state, headers))]
pub async fn search_collection(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Result<Response> {
    render_collection(&state, &handle, &format!("/search/{handle}"), raw, &headers).await
}

async fn render_collection(
    state: &AppState,
    handle: &str,
    path: &str,
    raw: Option<String>,
    headers: &HeaderMap,
) -> Result<Response> {
    let layout = SiteLayout::load(state).await;
    let query = QueryParams::parse(raw.as_deref().unwrap_or_default());

    let collection = match state
        .storefront()
        .get_collection_by_handle(handle, state.site().catalog_page_size)
        .await
    {
        Ok(collection) => collection,
        Err(ShopifyError::NotFound(_)) => {
            return Ok((
                StatusCode::NOT_FOUND,
                ListingTemplate {
                    layout,
                    heading: "Collection Not Found".to_string(),
                    description: None,
                    listing: ListingView::build(path, &[], &QueryParams::new()),
                },
            )
                .into_response());
        }
        Err(e) => return Err(AppError::from(e)),
    };

    if !query.is_empty() {
        let encoded = query.to_query_string();
        add_breadcrumb(
            "catalog",
            "Filtered collection",
            Some(&[("handle", handle), ("query", encoded.as_str())]),
        );
    }

    let listing = ListingView::build(path, &catalog_items(&collection.products), &query);
    let view = CollectionView::from(&collection);

    Ok(respond(
        headers,
        ListingTemplate {
            layout,
            heading: view.title,
            description: view.description,
            listing,
        },
    ))
}

/// HTMX requests get the canonical URL pushed into history, so a price
/// submission spanning the whole range leaves no price keys behind.
fn respond(headers: &HeaderMap, template: ListingTemplate) -> Response {
    if headers.contains_key(HX_REQUEST) {
        let canonical = template.listing.canonical_href.clone();
        ([(HX_PUSH_URL, canonical)], template).into_response()
    } else {
        template.into_response()
    }
}
