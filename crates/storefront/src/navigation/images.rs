//! Keyed, at-most-once collection image lookups for the mega menu.

use std::collections::HashMap;
use std::future::Future;

use crate::shopify::{ShopifyError, StorefrontClient};

/// Where a menu entry's image lookup stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageState {
    Pending,
    Resolved(String),
    /// Looked up and not found, or the lookup failed. Terminal.
    Absent,
}

/// Request cache keyed by menu path.
///
/// A key moves `Pending -> Resolved | Absent` exactly once and is never
/// requested again.
#[derive(Debug, Clone, Default)]
pub struct ImageRequests {
    entries: HashMap<String, ImageState>,
}

impl ImageRequests {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as pending. Returns `true` only if it was never requested.
    pub fn begin(&mut self, key: &str) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(key.to_string(), ImageState::Pending);
        true
    }

    /// Record the outcome of a pending lookup. Settled keys are left alone.
    pub fn resolve(&mut self, key: &str, image: Option<String>) {
        if let Some(state) = self.entries.get_mut(key)
            && *state == ImageState::Pending
        {
            *state = image.map_or(ImageState::Absent, ImageState::Resolved);
        }
    }

    #[must_use]
    pub fn state(&self, key: &str) -> Option<&ImageState> {
        self.entries.get(key)
    }

    /// The resolved image URL. Pending, absent and unknown keys all give `None`.
    #[must_use]
    pub fn image(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(ImageState::Resolved(url)) => Some(url),
            _ => None,
        }
    }
}

/// Something that can resolve a collection handle to an image URL.
pub trait ImageSource {
    /// `Ok(None)` when the collection does not exist or has no image.
    fn collection_image(
        &self,
        handle: &str,
    ) -> impl Future<Output = Result<Option<String>, ShopifyError>> + Send;
}

impl ImageSource for StorefrontClient {
    async fn collection_image(&self, handle: &str) -> Result<Option<String>, ShopifyError> {
        let collection = self.get_collection_image(handle).await?;
        Ok(collection.and_then(|c| c.image).map(|image| image.url))
    }
}
