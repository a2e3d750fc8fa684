//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use super::layout::SiteLayout;
use super::listing::ProductCardView;
use crate::catalog::catalog_items;
use crate::filters;
use crate::state::AppState;

/// Number of products in the featured grid.
const FEATURED_PRODUCT_COUNT: i64 = 8;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: SiteLayout,
    /// Handle of the featured collection, for the "shop all" link.
    pub featured_handle: String,
    /// Featured collection title; `None` when it could not be loaded.
    pub featured_title: Option<String>,
    pub products: Vec<ProductCardView>,
}

/// Display the home page.
///
/// A missing featured collection renders the hero alone.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let layout = SiteLayout::load(&state).await;
    let handle = state.site().featured_collection_handle.clone();

    let (featured_title, products) = state
        .storefront()
        .get_collection_by_handle(&handle, FEATURED_PRODUCT_COUNT)
        .await
        .map_or_else(
            |e| {
                tracing::error!("Failed to fetch featured collection: {e}");
                (None, Vec::new())
            },
            |collection| {
                let products = catalog_items(&collection.products)
                    .iter()
                    .map(ProductCardView::from)
                    .collect();
                (Some(collection.title), products)
            },
        );

    HomeTemplate {
        layout,
        featured_handle: handle,
        featured_title,
        products,
    }
}
