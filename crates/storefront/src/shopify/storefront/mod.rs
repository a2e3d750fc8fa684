//! Shopify Storefront API client implementation.
//!
//! Uses `graphql_client` request bodies with `reqwest` 0.13 for HTTP.
//! Read queries are cached using `moka` (5-minute TTL).

mod cache;
mod conversions;
pub mod queries;

use std::sync::Arc;
use std::time::Duration;

use graphql_client::{GraphQLQuery, Response};
use moka::future::Cache;
use secrecy::ExposeSecret;
use tracing::{debug, instrument};

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::types::{
    Article, Blog, Collection, CollectionConnection, CollectionImage, Menu, NewsletterSignup,
    Page, Product, ProductConnection,
};
use crate::shopify::{GraphQLError, GraphQLErrorLocation, ShopifyError};

use cache::{CacheKey, CacheValue};
use conversions::{
    convert_article, convert_blog, convert_collection, convert_collection_connection,
    convert_collection_image, convert_menu, convert_page, convert_product,
    convert_product_connection, convert_product_fields, convert_user_error,
};
use queries::{
    CustomerCreate, GetArticle, GetBlog, GetCollectionByHandle, GetCollectionImage,
    GetCollections, GetMenu, GetPage, GetProductByHandle, GetProductRecommendations, GetProducts,
    customer_create, get_article, get_blog, get_collection_by_handle, get_collection_image,
    get_collections, get_menu, get_page, get_product_by_handle, get_product_recommendations,
    get_products,
};

const CACHE_TTL: Duration = Duration::from_secs(300);
const CACHE_CAPACITY: u64 = 1000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Characters of a response body kept in logs.
const LOG_BODY_LIMIT: usize = 500;

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Provides type-safe access to products, collections, menus, pages and
/// blog articles.
/// Read results are cached for 5 minutes.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        let endpoint = format!(
            "https://{}/api/{}/graphql.json",
            config.store, config.api_version
        );

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            inner: Arc::new(StorefrontClientInner {
                client,
                endpoint,
                access_token: config.storefront_private_token.expose_secret().to_string(),
                cache,
            }),
        }
    }

    /// Execute a GraphQL operation.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ShopifyError> {
        let request_body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            // Private tokens use their own header, not X-Shopify-Storefront-Access-Token
            .header(
                "Shopify-Storefront-Private-Token",
                &self.inner.access_token,
            )
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Read as text first so failures can log the body
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                operation = request_body.operation_name,
                body = %snippet(&response_text, LOG_BODY_LIMIT),
                "Shopify API returned non-success status"
            );
            return Err(single_error(format!(
                "HTTP {status}: {}",
                snippet(&response_text, 200)
            )));
        }

        let response: Response<Q::ResponseData> = serde_json::from_str(&response_text)
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    operation = request_body.operation_name,
                    body = %snippet(&response_text, LOG_BODY_LIMIT),
                    "Failed to parse Shopify GraphQL response"
                );
                ShopifyError::Parse(e)
            })?;

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            debug!(errors = ?errors, "GraphQL errors in response");
            return Err(ShopifyError::GraphQL(
                errors.into_iter().map(convert_graphql_error).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                operation = request_body.operation_name,
                body = %snippet(&response_text, LOG_BODY_LIMIT),
                "Shopify GraphQL response has no data and no errors"
            );
            single_error("No data in response".to_string())
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a product by its handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product_by_handle(&self, handle: &str) -> Result<Product, ShopifyError> {
        let cache_key = CacheKey::Product(handle.to_string());

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let variables = get_product_by_handle::Variables {
            handle: handle.to_string(),
        };
        let data = self.execute::<GetProductByHandle>(variables).await?;

        let product = data
            .product
            .map(convert_product)
            .ok_or_else(|| ShopifyError::NotFound(format!("Product not found: {handle}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get a page of products, optionally narrowed by a Shopify search query.
    ///
    /// Search queries are not cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        first: i64,
        after: Option<String>,
        query: Option<String>,
    ) -> Result<ProductConnection, ShopifyError> {
        let cache_key = CacheKey::Products {
            first,
            cursor: after.clone(),
        };

        if query.is_none()
            && let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let cacheable = query.is_none();
        let variables = get_products::Variables {
            first,
            after,
            query,
        };
        let data = self.execute::<GetProducts>(variables).await?;
        let connection = convert_product_connection(data.products);

        if cacheable {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Products(connection.clone()))
                .await;
        }

        Ok(connection)
    }

    /// Get Shopify's related-product recommendations for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product_recommendations(
        &self,
        product_id: &str,
    ) -> Result<Vec<Product>, ShopifyError> {
        let cache_key = CacheKey::Recommendations(product_id.to_string());

        if let Some(CacheValue::Recommendations(products)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for product recommendations");
            return Ok(products);
        }

        let variables = get_product_recommendations::Variables {
            product_id: product_id.to_string(),
        };
        let data = self.execute::<GetProductRecommendations>(variables).await?;

        let products: Vec<Product> = data
            .product_recommendations
            .map(|recs| recs.into_iter().map(convert_product_fields).collect())
            .unwrap_or_default();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Recommendations(products.clone()))
            .await;

        Ok(products)
    }

    // =========================================================================
    // Collection Methods
    // =========================================================================

    /// Get a collection with up to `product_count` of its products.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection is not found or the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_collection_by_handle(
        &self,
        handle: &str,
        product_count: i64,
    ) -> Result<Collection, ShopifyError> {
        let cache_key = CacheKey::Collection {
            handle: handle.to_string(),
            product_count,
        };

        if let Some(CacheValue::Collection(collection)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for collection");
            return Ok(*collection);
        }

        let variables = get_collection_by_handle::Variables {
            handle: handle.to_string(),
            product_count,
        };
        let data = self.execute::<GetCollectionByHandle>(variables).await?;

        let collection = data
            .collection
            .map(convert_collection)
            .ok_or_else(|| ShopifyError::NotFound(format!("Collection not found: {handle}")))?;

        self.inner
            .cache
            .insert(
                cache_key,
                CacheValue::Collection(Box::new(collection.clone())),
            )
            .await;

        Ok(collection)
    }

    /// Get a page of collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_collections(
        &self,
        first: i64,
        after: Option<String>,
    ) -> Result<CollectionConnection, ShopifyError> {
        let cache_key = CacheKey::Collections {
            first,
            cursor: after.clone(),
        };

        if let Some(CacheValue::Collections(collections)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for collections");
            return Ok(collections);
        }

        let data = self
            .execute::<GetCollections>(get_collections::Variables { first, after })
            .await?;
        let connection = convert_collection_connection(data.collections);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Collections(connection.clone()))
            .await;

        Ok(connection)
    }

    /// Get the title and image of a collection.
    ///
    /// Returns `Ok(None)` for an unknown handle. Both outcomes are cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_collection_image(
        &self,
        handle: &str,
    ) -> Result<Option<CollectionImage>, ShopifyError> {
        let cache_key = CacheKey::CollectionImage(handle.to_string());

        if let Some(CacheValue::CollectionImage(image)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for collection image");
            return Ok(image);
        }

        let variables = get_collection_image::Variables {
            handle: handle.to_string(),
        };
        let data = self.execute::<GetCollectionImage>(variables).await?;
        let image = data.collection.map(convert_collection_image);

        self.inner
            .cache
            .insert(cache_key, CacheValue::CollectionImage(image.clone()))
            .await;

        Ok(image)
    }

    // =========================================================================
    // Navigation and Content Methods
    // =========================================================================

    /// Get a navigation menu by handle. `Ok(None)` if no such menu exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_menu(&self, handle: &str) -> Result<Option<Menu>, ShopifyError> {
        let cache_key = CacheKey::Menu(handle.to_string());

        if let Some(CacheValue::Menu(menu)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for menu");
            return Ok(menu);
        }

        let variables = get_menu::Variables {
            handle: handle.to_string(),
        };
        let data = self.execute::<GetMenu>(variables).await?;
        let menu = data.menu.map(convert_menu);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Menu(menu.clone()))
            .await;

        Ok(menu)
    }

    /// Get a static page by handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the page is not found or the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_page(&self, handle: &str) -> Result<Page, ShopifyError> {
        let cache_key = CacheKey::Page(handle.to_string());

        if let Some(CacheValue::Page(page)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for page");
            return Ok(*page);
        }

        let variables = get_page::Variables {
            handle: handle.to_string(),
        };
        let data = self.execute::<GetPage>(variables).await?;

        let page = data
            .page
            .map(convert_page)
            .ok_or_else(|| ShopifyError::NotFound(format!("Page not found: {handle}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Page(Box::new(page.clone())))
            .await;

        Ok(page)
    }

    /// Get a blog with its `first` most recent articles.
    ///
    /// Article bodies are not loaded; use [`Self::get_article`] for those.
    ///
    /// # Errors
    ///
    /// Returns an error if the blog is not found or the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_blog(&self, handle: &str, first: i64) -> Result<Blog, ShopifyError> {
        let cache_key = CacheKey::Blog {
            handle: handle.to_string(),
            first,
        };

        if let Some(CacheValue::Blog(blog)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for blog");
            return Ok(*blog);
        }

        let variables = get_blog::Variables {
            handle: handle.to_string(),
            first,
        };
        let data = self.execute::<GetBlog>(variables).await?;

        let blog = data
            .blog
            .map(convert_blog)
            .ok_or_else(|| ShopifyError::NotFound(format!("Blog not found: {handle}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Blog(Box::new(blog.clone())))
            .await;

        Ok(blog)
    }

    /// Get one article of a blog, with its body.
    ///
    /// # Errors
    ///
    /// Returns an error if the blog or article is not found or the API
    /// request fails.
    #[instrument(skip(self), fields(blog = %blog_handle, handle = %handle))]
    pub async fn get_article(
        &self,
        blog_handle: &str,
        handle: &str,
    ) -> Result<Article, ShopifyError> {
        let cache_key = CacheKey::Article {
            blog: blog_handle.to_string(),
            handle: handle.to_string(),
        };

        if let Some(CacheValue::Article(article)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for article");
            return Ok(*article);
        }

        let variables = get_article::Variables {
            blog_handle: blog_handle.to_string(),
            handle: handle.to_string(),
        };
        let data = self.execute::<GetArticle>(variables).await?;

        let article = data
            .blog
            .and_then(|blog| blog.article_by_handle)
            .map(convert_article)
            .ok_or_else(|| ShopifyError::NotFound(format!("Article not found: {handle}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Article(Box::new(article.clone())))
            .await;

        Ok(article)
    }

    // =========================================================================
    // Customer Methods
    // =========================================================================

    /// Register an email for marketing by creating a customer that accepts it.
    ///
    /// The Storefront API requires a password; a random one is generated and
    /// never shown. An email that already has an account counts as subscribed.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::UserError` with Shopify's message if the email
    /// is rejected, or an error if the API request fails.
    #[instrument(skip(self, email))]
    pub async fn subscribe_newsletter(
        &self,
        email: &str,
    ) -> Result<NewsletterSignup, ShopifyError> {
        let variables = customer_create::Variables {
            input: customer_create::CustomerCreateInput {
                email: email.to_string(),
                password: uuid::Uuid::new_v4().simple().to_string(),
                accepts_marketing: true,
            },
        };

        let data = self.execute::<CustomerCreate>(variables).await?;
        let payload = data
            .customer_create
            .ok_or_else(|| single_error("No customerCreate payload".to_string()))?;

        let user_errors: Vec<_> = payload
            .customer_user_errors
            .into_iter()
            .map(convert_user_error)
            .collect();

        if user_errors.iter().any(|e| e.is_email_taken()) {
            debug!("Newsletter email already registered");
            return Ok(NewsletterSignup::AlreadySubscribed);
        }
        if let Some(error) = user_errors.into_iter().next() {
            return Err(ShopifyError::UserError(error.message));
        }

        payload
            .customer
            .map(|_| NewsletterSignup::Subscribed)
            .ok_or_else(|| single_error("customerCreate returned no customer".to_string()))
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate all cached data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn snippet(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

fn single_error(message: String) -> ShopifyError {
    ShopifyError::GraphQL(vec![GraphQLError {
        message,
        locations: vec![],
        path: vec![],
    }])
}

fn convert_graphql_error(e: graphql_client::Error) -> GraphQLError {
    GraphQLError {
        message: e.message,
        locations: e.locations.map_or_else(Vec::new, |locs| {
            locs.into_iter()
                .map(|l| GraphQLErrorLocation {
                    line: i64::from(l.line),
                    column: i64::from(l.column),
                })
                .collect()
        }),
        path: e.path.map_or_else(Vec::new, |p| {
            p.into_iter()
                .map(|fragment| match fragment {
                    graphql_client::PathFragment::Key(s) => serde_json::Value::String(s),
                    graphql_client::PathFragment::Index(i) => serde_json::Value::Number(i.into()),
                })
                .collect()
        }),
    }
}
