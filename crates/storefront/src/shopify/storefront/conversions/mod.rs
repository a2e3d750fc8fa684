//! Type conversion functions for Shopify Storefront API responses.

pub mod collections;
pub mod content;
pub mod products;

pub use collections::{convert_collection, convert_collection_connection, convert_collection_image};
pub use content::{convert_article, convert_blog, convert_menu, convert_page, convert_user_error};
pub use products::{convert_product, convert_product_connection, convert_product_fields};
