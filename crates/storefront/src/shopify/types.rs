//! Domain types for Shopify Storefront API.
//!
//! These types provide a clean, ergonomic API separate from the raw
//! response shapes in `storefront::queries`.

use serde::{Deserialize, Serialize};

// =============================================================================
// Money Types
// =============================================================================

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

/// Price range for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRange {
    /// Minimum price among all variants.
    pub min_variant_price: Money,
    /// Maximum price among all variants.
    pub max_variant_price: Money,
}

// =============================================================================
// Image Types
// =============================================================================

/// Product or collection image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub id: Option<String>,
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

// =============================================================================
// SEO Types
// =============================================================================

/// SEO metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seo {
    /// Page title for search engines.
    pub title: Option<String>,
    /// Meta description.
    pub description: Option<String>,
}

// =============================================================================
// Product Types
// =============================================================================

/// Selected option on a product variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Option name (e.g., "Size", "Colour").
    pub name: String,
    /// Selected value (e.g., "M", "Navy").
    pub value: String,
}

/// Product option definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOption {
    pub id: String,
    /// Option name (e.g., "Size").
    pub name: String,
    /// Available values (e.g., `["S", "M", "L"]`).
    pub values: Vec<String>,
}

/// A product variant (specific combination of options).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    /// Variant title (combination of option values).
    pub title: String,
    pub available_for_sale: bool,
    pub price: Money,
    /// Compare-at price (original price if on sale).
    pub compare_at_price: Option<Money>,
    pub selected_options: Vec<SelectedOption>,
    pub image: Option<Image>,
}

/// A product in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    /// URL handle.
    pub handle: String,
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// HTML description. Empty for list queries.
    pub description_html: String,
    /// Whether any variant is available.
    pub available_for_sale: bool,
    /// Product type/category.
    #[serde(rename = "product_type")]
    pub kind: String,
    pub vendor: String,
    /// Product tags, including structured `type:`/`color:`/`material:` tags.
    pub tags: Vec<String>,
    /// Creation timestamp (ISO 8601).
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub seo: Option<Seo>,
    /// Price range across variants.
    pub price_range: PriceRange,
    pub featured_image: Option<Image>,
    /// All product images. Only the featured image for list queries.
    pub images: Vec<Image>,
    pub options: Vec<ProductOption>,
    pub variants: Vec<ProductVariant>,
}

// =============================================================================
// Collection Types
// =============================================================================

/// A collection of products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    /// URL handle.
    pub handle: String,
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// HTML description.
    pub description_html: String,
    pub updated_at: Option<String>,
    pub seo: Option<Seo>,
    pub image: Option<Image>,
    /// Products in this collection, in the collection's own order.
    pub products: Vec<Product>,
}

/// The image and title of a collection, as the mega menu needs them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionImage {
    pub title: String,
    pub image: Option<Image>,
}

// =============================================================================
// Pagination Types
// =============================================================================

/// Pagination information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Cursor for the last item.
    pub end_cursor: Option<String>,
}

/// Paginated list of products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConnection {
    pub products: Vec<Product>,
    pub page_info: PageInfo,
}

/// Paginated list of collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConnection {
    pub collections: Vec<Collection>,
    pub page_info: PageInfo,
}

// =============================================================================
// Navigation and Content Types
// =============================================================================

/// A navigation menu as configured in the Shopify admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    pub handle: String,
    pub title: String,
    pub items: Vec<MenuItem>,
}

/// One menu entry. Shopify nests menus up to three levels deep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub title: String,
    /// Absolute URL on the shop domain, or `None` for a heading without a link.
    pub url: Option<String>,
    pub items: Vec<MenuItem>,
}

/// A static online-store page (About, Delivery, FAQs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub handle: String,
    pub title: String,
    /// Page body as HTML.
    pub body: String,
    pub body_summary: String,
    pub seo: Option<Seo>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A blog and its most recent articles, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub handle: String,
    pub title: String,
    pub articles: Vec<Article>,
}

/// A blog article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub handle: String,
    pub title: String,
    /// Plain-text summary, `None` when the editor left it blank.
    pub excerpt: Option<String>,
    /// Article body as HTML. Empty for list queries.
    pub content_html: String,
    /// Publication timestamp (ISO 8601).
    pub published_at: Option<String>,
    pub author_name: Option<String>,
    pub tags: Vec<String>,
    pub image: Option<Image>,
    pub seo: Option<Seo>,
}

// =============================================================================
// Customer Types
// =============================================================================

/// Outcome of a newsletter sign-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewsletterSignup {
    /// A new customer record was created with marketing consent.
    Subscribed,
    /// A customer with this email already exists.
    AlreadySubscribed,
}

/// A user error from a customer mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerUserError {
    /// Shopify error code (e.g., `TAKEN`, `INVALID`).
    pub code: Option<String>,
    /// Input path the error refers to.
    pub field: Vec<String>,
    pub message: String,
}

impl CustomerUserError {
    /// Whether this error means the email is already registered.
    #[must_use]
    pub fn is_email_taken(&self) -> bool {
        if self.code.as_deref() == Some("TAKEN") {
            return true;
        }
        let message = self.message.to_lowercase();
        self.field.iter().any(|f| f == "email")
            && (message.contains("taken") || message.contains("already exists"))
    }
}
