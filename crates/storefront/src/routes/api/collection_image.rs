//! Collection image lookup for the mega menu.
//!
//! `GET /api/collection-image/{handle}` returns the collection's title and
//! image URL. Clients treat "not found" and "no image" the same way: the
//! menu group renders without a picture.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use super::ApiError;
use crate::state::AppState;

/// Longest handle Shopify accepts.
const MAX_HANDLE_LENGTH: usize = 255;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CollectionImageResponse {
    pub image: Option<String>,
    pub title: Option<String>,
}

/// Whether `handle` could name a collection at all.
fn is_valid_handle(handle: &str) -> bool {
    !handle.is_empty()
        && handle.len() <= MAX_HANDLE_LENGTH
        && handle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Look up a collection's image.
///
/// # Errors
///
/// 404 when the collection does not exist, 500 when the lookup fails.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<CollectionImageResponse>, ApiError> {
    if !is_valid_handle(&handle) {
        return Err(ApiError::not_found("Collection not found"));
    }

    match state.storefront().get_collection_image(&handle).await {
        Ok(Some(collection)) => Ok(Json(CollectionImageResponse {
            image: collection.image.map(|img| img.url),
            title: Some(collection.title),
        })),
        Ok(None) => Err(ApiError::not_found("Collection not found")),
        Err(e) => {
            tracing::error!(handle = %handle, error = %e, "Failed to fetch collection image");
            Err(ApiError::internal("Failed to fetch collection image"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_handle() {
        assert!(is_valid_handle("knitwear"));
        assert!(is_valid_handle("winter-sale_2026"));
        assert!(!is_valid_handle(""));
        assert!(!is_valid_handle("knit wear"));
        assert!(!is_valid_handle("../admin"));
        assert!(!is_valid_handle(&"a".repeat(MAX_HANDLE_LENGTH + 1)));
    }

    #[test]
    fn test_response_serializes_nulls() {
        let body = serde_json::to_value(CollectionImageResponse {
            image: None,
            title: Some("Knitwear".to_string()),
        })
        .unwrap_or_default();
        assert_eq!(body, serde_json::json!({ "image": null, "title": "Knitwear" }));
    }
}
