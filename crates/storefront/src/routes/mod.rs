//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Home page (featured collection)
//! GET  /health                        - Liveness check
//!
//! # Catalog
//! GET  /collections                   - Collection index
//! GET  /collections/{handle}          - Filtered collection listing
//! GET  /search                        - Every product, same filters
//! GET  /search/{handle}               - Alias of /collections/{handle}
//! GET  /products/{handle}             - Product detail
//!
//! # Content
//! GET  /pages/{handle}                - Shopify content page
//! GET  /articles                      - Blog article index
//! GET  /articles/{handle}             - Blog article
//! POST /newsletter                    - Newsletter signup (HTMX fragment)
//!
//! # API
//! GET  /api/collection-image/{handle} - Collection image for the mega menu
//! ```
//!
//! Listing filters live entirely in the query string; see [`listing`].

pub mod api;
pub mod articles;
pub mod collections;
pub mod home;
pub mod layout;
pub mod listing;
pub mod newsletter;
pub mod pages;
pub mod products;
pub mod structured_data;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Directory served under `/static`.
const STATIC_DIR: &str = "crates/storefront/static";

/// Create the collection routes router.
pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(collections::index))
        .route("/{handle}", get(collections::show))
}

/// Create the search routes router.
pub fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(collections::search))
        .route("/{handle}", get(collections::search_collection))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{handle}", get(products::show))
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new().route(
        "/collection-image/{handle}",
        get(api::collection_image::show),
    )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog
        .nest("/collections", collection_routes())
        .nest("/search", search_routes())
        .nest("/products", product_routes())
        // Content
        .nest("/pages", pages::router())
        .nest("/articles", articles::router())
        .route("/newsletter", post(newsletter::subscribe))
        // API
        .nest("/api", api_routes())
}

/// The full application: routes, static files and middleware.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check Shopify.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use secrecy::SecretString;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{ShopifyStorefrontConfig, SiteConfig, StorefrontConfig};

    fn state() -> AppState {
        AppState::new(StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            shopify: ShopifyStorefrontConfig {
                store: "kittaly-test.myshopify.com".to_string(),
                api_version: "2026-01".to_string(),
                storefront_private_token: SecretString::from("private"),
            },
            site: SiteConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
        })
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(state())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(body_string(response).await, "ok");
    }

    #[tokio::test]
    async fn test_collection_image_rejects_impossible_handle() {
        let response = app(state())
            .oneshot(
                Request::get("/api/collection-image/knit%20wear")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Collection not found" }));
    }

    #[tokio::test]
    async fn test_newsletter_invalid_email_returns_error_fragment() {
        let response = app(state())
            .oneshot(
                Request::post("/newsletter")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("email=not-an-email"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Please enter a valid email address."));
        assert!(body.contains("not-an-email"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = app(state())
            .oneshot(Request::get("/cart").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
