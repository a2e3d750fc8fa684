//! Cache types for Storefront API responses.

use crate::shopify::types::{
    Article, Blog, Collection, CollectionConnection, CollectionImage, Menu, Page, Product,
    ProductConnection,
};

/// Cache key, one variant per cached operation.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(String),
    Products {
        first: i64,
        cursor: Option<String>,
    },
    Recommendations(String),
    Collection {
        handle: String,
        product_count: i64,
    },
    Collections {
        first: i64,
        cursor: Option<String>,
    },
    CollectionImage(String),
    Menu(String),
    Page(String),
    Blog {
        handle: String,
        first: i64,
    },
    Article {
        blog: String,
        handle: String,
    },
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(ProductConnection),
    Recommendations(Vec<Product>),
    Collection(Box<Collection>),
    Collections(CollectionConnection),
    /// `None` records a collection that does not exist.
    CollectionImage(Option<CollectionImage>),
    Menu(Option<Menu>),
    Page(Box<Page>),
    Blog(Box<Blog>),
    Article(Box<Article>),
}
