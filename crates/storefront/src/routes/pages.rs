//! Shopify content page handlers (about, delivery, FAQs...).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use tracing::instrument;

use super::layout::SiteLayout;
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Content page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/show.html")]
pub struct ContentPageTemplate {
    pub layout: SiteLayout,
    pub title: String,
    pub description: String,
    pub body_html: String,
}

/// Display a content page by handle.
///
/// # Errors
///
/// Returns 404 if the page doesn't exist.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<impl IntoResponse> {
    let layout = SiteLayout::load(&state).await;
    let page = state.storefront().get_page(&handle).await?;

    let description = page
        .seo
        .as_ref()
        .and_then(|seo| seo.description.clone())
        .unwrap_or_else(|| page.body_summary.clone());

    Ok(ContentPageTemplate {
        layout,
        title: page.title,
        description,
        body_html: page.body,
    })
}

/// Create the pages routes router.
pub fn router() -> Router<AppState> {
    Router::new().route("/{handle}", get(show))
}
