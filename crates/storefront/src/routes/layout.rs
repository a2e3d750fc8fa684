//! Data shared by every full-page template.

use tracing::{instrument, warn};

use crate::navigation::{ImageRequests, MegaMenu};
use crate::state::AppState;

/// Header and footer data.
#[derive(Debug, Clone, Default)]
pub struct SiteLayout {
    pub site_name: String,
    pub menu: MegaMenu,
}

impl SiteLayout {
    /// Load the header menu and its group images.
    ///
    /// A missing or failing menu renders as an empty header rather than an
    /// error page.
    #[instrument(skip(state))]
    pub async fn load(state: &AppState) -> Self {
        let site = state.site();

        let mut menu = match state.storefront().get_menu(&site.header_menu_handle).await {
            Ok(Some(menu)) => MegaMenu::compose(&menu),
            Ok(None) => {
                warn!(handle = %site.header_menu_handle, "Header menu not found");
                MegaMenu::default()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load header menu");
                MegaMenu::default()
            }
        };

        let mut requests = ImageRequests::new();
        menu.enrich(state.storefront(), &mut requests).await;

        Self {
            site_name: site.site_name.clone(),
            menu,
        }
    }
}
