//! GraphQL operations for the Shopify Storefront API.
//!
//! No schema is checked in, so each operation implements [`GraphQLQuery`]
//! by hand: one module per operation holding the document, its `Variables`
//! and a `ResponseData` tree that mirrors the selection set. Shared
//! selections live in [`fragments`].

use graphql_client::{GraphQLQuery, QueryBody};

macro_rules! image_fields {
    () => {
        "fragment ImageFields on Image { id url altText width height }\n"
    };
}

macro_rules! product_fields {
    () => {
        r"fragment ProductFields on Product {
  id
  handle
  title
  description
  availableForSale
  productType
  vendor
  tags
  createdAt
  updatedAt
  priceRange {
    minVariantPrice { amount currencyCode }
    maxVariantPrice { amount currencyCode }
  }
  featuredImage { ...ImageFields }
  variants(first: 100) {
    edges {
      node {
        id
        title
        availableForSale
        price { amount currencyCode }
        compareAtPrice { amount currencyCode }
        selectedOptions { name value }
        image { ...ImageFields }
      }
    }
  }
}
"
    };
}

macro_rules! article_fields {
    () => {
        r"fragment ArticleFields on Article {
  id
  handle
  title
  excerpt
  publishedAt
  tags
  authorV2 { name }
  image { ...ImageFields }
  seo { title description }
}
"
    };
}

/// Implement [`GraphQLQuery`] for an operation struct from its module.
macro_rules! operation {
    ($operation:ident, $module:ident) => {
        impl GraphQLQuery for $operation {
            type Variables = $module::Variables;
            type ResponseData = $module::ResponseData;

            fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
                QueryBody {
                    variables,
                    query: $module::QUERY,
                    operation_name: $module::OPERATION_NAME,
                }
            }
        }
    };
}

// =============================================================================
// Shared Selections
// =============================================================================

pub mod fragments {
    use serde::Deserialize;

    #[derive(Debug, Clone, Deserialize)]
    pub struct Connection<T> {
        pub edges: Vec<Edge<T>>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Edge<T> {
        pub node: T,
    }

    impl<T> Connection<T> {
        pub fn into_nodes(self) -> impl Iterator<Item = T> {
            self.edges.into_iter().map(|edge| edge.node)
        }
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PageInfo {
        pub has_next_page: bool,
        pub end_cursor: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Money {
        pub amount: String,
        pub currency_code: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PriceRange {
        pub min_variant_price: Money,
        pub max_variant_price: Money,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ImageFields {
        pub id: Option<String>,
        pub url: String,
        pub alt_text: Option<String>,
        pub width: Option<i64>,
        pub height: Option<i64>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Seo {
        pub title: Option<String>,
        pub description: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct SelectedOption {
        pub name: String,
        pub value: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct VariantFields {
        pub id: String,
        pub title: String,
        pub available_for_sale: bool,
        pub price: Money,
        pub compare_at_price: Option<Money>,
        pub selected_options: Vec<SelectedOption>,
        pub image: Option<ImageFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ArticleAuthor {
        pub name: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ArticleFields {
        pub id: String,
        pub handle: String,
        pub title: String,
        pub excerpt: Option<String>,
        pub published_at: Option<String>,
        pub tags: Vec<String>,
        #[serde(rename = "authorV2")]
        pub author: Option<ArticleAuthor>,
        pub image: Option<ImageFields>,
        pub seo: Option<Seo>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductFields {
        pub id: String,
        pub handle: String,
        pub title: String,
        pub description: String,
        pub available_for_sale: bool,
        pub product_type: String,
        pub vendor: String,
        pub tags: Vec<String>,
        pub created_at: Option<String>,
        pub updated_at: Option<String>,
        pub price_range: PriceRange,
        pub featured_image: Option<ImageFields>,
        pub variants: Connection<VariantFields>,
    }
}

// =============================================================================
// Collection Queries
// =============================================================================

pub struct GetCollectionByHandle;
operation!(GetCollectionByHandle, get_collection_by_handle);

pub mod get_collection_by_handle {
    use serde::{Deserialize, Serialize};

    use super::fragments::{Connection, ImageFields, ProductFields, Seo};

    pub const OPERATION_NAME: &str = "GetCollectionByHandle";
    pub const QUERY: &str = concat!(
        r"query GetCollectionByHandle($handle: String!, $productCount: Int!) {
  collection(handle: $handle) {
    id
    handle
    title
    description
    descriptionHtml
    updatedAt
    seo { title description }
    image { ...ImageFields }
    products(first: $productCount) {
      edges { node { ...ProductFields } }
    }
  }
}
",
        product_fields!(),
        image_fields!(),
    );

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub handle: String,
        pub product_count: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collection: Option<Collection>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Collection {
        pub id: String,
        pub handle: String,
        pub title: String,
        pub description: String,
        pub description_html: String,
        pub updated_at: Option<String>,
        pub seo: Option<Seo>,
        pub image: Option<ImageFields>,
        pub products: Connection<ProductFields>,
    }
}

pub struct GetCollections;
operation!(GetCollections, get_collections);

pub mod get_collections {
    use serde::{Deserialize, Serialize};

    use super::fragments::{Edge, ImageFields, PageInfo, Seo};

    pub const OPERATION_NAME: &str = "GetCollections";
    pub const QUERY: &str = concat!(
        r"query GetCollections($first: Int!, $after: String) {
  collections(first: $first, after: $after) {
    edges {
      node {
        id
        handle
        title
        description
        descriptionHtml
        updatedAt
        seo { title description }
        image { ...ImageFields }
      }
    }
    pageInfo { hasNextPage endCursor }
  }
}
",
        image_fields!(),
    );

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
        pub after: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collections: Collections,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Collections {
        pub edges: Vec<Edge<CollectionNode>>,
        pub page_info: PageInfo,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CollectionNode {
        pub id: String,
        pub handle: String,
        pub title: String,
        pub description: String,
        pub description_html: String,
        pub updated_at: Option<String>,
        pub seo: Option<Seo>,
        pub image: Option<ImageFields>,
    }
}

pub struct GetCollectionImage;
operation!(GetCollectionImage, get_collection_image);

pub mod get_collection_image {
    use serde::{Deserialize, Serialize};

    use super::fragments::ImageFields;

    pub const OPERATION_NAME: &str = "GetCollectionImage";
    pub const QUERY: &str = concat!(
        r"query GetCollectionImage($handle: String!) {
  collection(handle: $handle) {
    title
    image { ...ImageFields }
  }
}
",
        image_fields!(),
    );

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collection: Option<Collection>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Collection {
        pub title: String,
        pub image: Option<ImageFields>,
    }
}

// =============================================================================
// Product Queries
// =============================================================================

pub struct GetProducts;
operation!(GetProducts, get_products);

pub mod get_products {
    use serde::{Deserialize, Serialize};

    use super::fragments::{Edge, PageInfo, ProductFields};

    pub const OPERATION_NAME: &str = "GetProducts";
    pub const QUERY: &str = concat!(
        r"query GetProducts($first: Int!, $after: String, $query: String) {
  products(first: $first, after: $after, query: $query) {
    edges { node { ...ProductFields } }
    pageInfo { hasNextPage endCursor }
  }
}
",
        product_fields!(),
        image_fields!(),
    );

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
        pub after: Option<String>,
        pub query: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: Products,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Products {
        pub edges: Vec<Edge<ProductFields>>,
        pub page_info: PageInfo,
    }
}

pub struct GetProductByHandle;
operation!(GetProductByHandle, get_product_by_handle);

pub mod get_product_by_handle {
    use serde::{Deserialize, Serialize};

    use super::fragments::{Connection, ImageFields, ProductFields, Seo};

    pub const OPERATION_NAME: &str = "GetProductByHandle";
    pub const QUERY: &str = concat!(
        r"query GetProductByHandle($handle: String!) {
  product(handle: $handle) {
    ...ProductFields
    descriptionHtml
    seo { title description }
    options { id name values }
    images(first: 20) {
      edges { node { ...ImageFields } }
    }
  }
}
",
        product_fields!(),
        image_fields!(),
    );

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub product: Option<Product>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Product {
        #[serde(flatten)]
        pub fields: ProductFields,
        pub description_html: String,
        pub seo: Option<Seo>,
        pub options: Vec<ProductOption>,
        pub images: Connection<ImageFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductOption {
        pub id: String,
        pub name: String,
        pub values: Vec<String>,
    }
}

pub struct GetProductRecommendations;
operation!(GetProductRecommendations, get_product_recommendations);

pub mod get_product_recommendations {
    use serde::{Deserialize, Serialize};

    use super::fragments::ProductFields;

    pub const OPERATION_NAME: &str = "GetProductRecommendations";
    pub const QUERY: &str = concat!(
        r"query GetProductRecommendations($productId: ID!) {
  productRecommendations(productId: $productId) {
    ...ProductFields
  }
}
",
        product_fields!(),
        image_fields!(),
    );

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub product_id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub product_recommendations: Option<Vec<ProductFields>>,
    }
}

// =============================================================================
// Navigation and Content Queries
// =============================================================================

pub struct GetMenu;
operation!(GetMenu, get_menu);

pub mod get_menu {
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "GetMenu";
    pub const QUERY: &str = r"query GetMenu($handle: String!) {
  menu(handle: $handle) {
    handle
    title
    items {
      title
      url
      items {
        title
        url
        items { title url }
      }
    }
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub menu: Option<Menu>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Menu {
        pub handle: String,
        pub title: String,
        pub items: Vec<MenuItem>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct MenuItem {
        pub title: String,
        pub url: Option<String>,
        /// Absent on the deepest selected level.
        #[serde(default)]
        pub items: Vec<MenuItem>,
    }
}

pub struct GetPage;
operation!(GetPage, get_page);

pub mod get_page {
    use serde::{Deserialize, Serialize};

    use super::fragments::Seo;

    pub const OPERATION_NAME: &str = "GetPage";
    pub const QUERY: &str = r"query GetPage($handle: String!) {
  page(handle: $handle) {
    id
    handle
    title
    body
    bodySummary
    seo { title description }
    createdAt
    updatedAt
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub page: Option<Page>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Page {
        pub id: String,
        pub handle: String,
        pub title: String,
        pub body: String,
        pub body_summary: String,
        pub seo: Option<Seo>,
        pub created_at: Option<String>,
        pub updated_at: Option<String>,
    }
}

pub struct GetBlog;
operation!(GetBlog, get_blog);

pub mod get_blog {
    use serde::{Deserialize, Serialize};

    use super::fragments::{ArticleFields, Connection};

    pub const OPERATION_NAME: &str = "GetBlog";
    pub const QUERY: &str = concat!(
        r"query GetBlog($handle: String!, $first: Int!) {
  blog(handle: $handle) {
    handle
    title
    articles(first: $first, sortKey: PUBLISHED_AT, reverse: true) {
      edges { node { ...ArticleFields } }
    }
  }
}
",
        article_fields!(),
        image_fields!(),
    );

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub handle: String,
        pub first: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub blog: Option<Blog>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Blog {
        pub handle: String,
        pub title: String,
        pub articles: Connection<ArticleFields>,
    }
}

pub struct GetArticle;
operation!(GetArticle, get_article);

pub mod get_article {
    use serde::{Deserialize, Serialize};

    use super::fragments::ArticleFields;

    pub const OPERATION_NAME: &str = "GetArticle";
    pub const QUERY: &str = concat!(
        r"query GetArticle($blogHandle: String!, $handle: String!) {
  blog(handle: $blogHandle) {
    articleByHandle(handle: $handle) {
      ...ArticleFields
      contentHtml
    }
  }
}
",
        article_fields!(),
        image_fields!(),
    );

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub blog_handle: String,
        pub handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub blog: Option<Blog>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Blog {
        pub article_by_handle: Option<Article>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Article {
        #[serde(flatten)]
        pub fields: ArticleFields,
        pub content_html: String,
    }
}

// =============================================================================
// Customer Mutations
// =============================================================================

pub struct CustomerCreate;
operation!(CustomerCreate, customer_create);

pub mod customer_create {
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "CustomerCreate";
    pub const QUERY: &str = r"mutation CustomerCreate($input: CustomerCreateInput!) {
  customerCreate(input: $input) {
    customer { id email }
    customerUserErrors { code field message }
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub input: CustomerCreateInput,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CustomerCreateInput {
        pub email: String,
        pub password: String,
        pub accepts_marketing: bool,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub customer_create: Option<CustomerCreatePayload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CustomerCreatePayload {
        pub customer: Option<Customer>,
        pub customer_user_errors: Vec<CustomerUserError>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Customer {
        pub id: String,
        pub email: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CustomerUserError {
        pub code: Option<String>,
        pub field: Option<Vec<String>>,
        pub message: String,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_includes_fragments() {
        let body = GetCollectionByHandle::build_query(get_collection_by_handle::Variables {
            handle: "knitwear".to_string(),
            product_count: 100,
        });
        assert_eq!(body.operation_name, "GetCollectionByHandle");
        assert!(body.query.contains("fragment ProductFields on Product"));
        assert!(body.query.contains("fragment ImageFields on Image"));

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["operationName"], "GetCollectionByHandle");
        assert_eq!(json["variables"]["productCount"], 100);
    }

    #[test]
    fn test_menu_query_has_no_fragments() {
        let body = GetMenu::build_query(get_menu::Variables {
            handle: "main-menu".to_string(),
        });
        assert!(!body.query.contains("fragment"));
    }

    #[test]
    fn test_deserialize_product_with_flattened_fields() {
        let json = serde_json::json!({
            "product": {
                "id": "gid://shopify/Product/1",
                "handle": "aran-jumper",
                "title": "Aran Jumper",
                "description": "Chunky knit",
                "descriptionHtml": "<p>Chunky knit</p>",
                "availableForSale": true,
                "productType": "Knitwear",
                "vendor": "Kittaly",
                "tags": ["type:Jumper", "colour:Cream"],
                "createdAt": "2025-09-01T10:00:00Z",
                "updatedAt": null,
                "priceRange": {
                    "minVariantPrice": { "amount": "85.0", "currencyCode": "GBP" },
                    "maxVariantPrice": { "amount": "95.0", "currencyCode": "GBP" }
                },
                "featuredImage": null,
                "variants": { "edges": [{ "node": {
                    "id": "gid://shopify/ProductVariant/11",
                    "title": "M",
                    "availableForSale": true,
                    "price": { "amount": "85.0", "currencyCode": "GBP" },
                    "compareAtPrice": null,
                    "selectedOptions": [{ "name": "Size", "value": "M" }],
                    "image": null
                } }] },
                "seo": { "title": null, "description": null },
                "options": [{ "id": "gid://shopify/ProductOption/5", "name": "Size", "values": ["M"] }],
                "images": { "edges": [] }
            }
        });

        let data: get_product_by_handle::ResponseData = serde_json::from_value(json).unwrap();
        let product = data.product.unwrap();
        assert_eq!(product.fields.handle, "aran-jumper");
        assert_eq!(product.fields.variants.edges.len(), 1);
        assert_eq!(product.options[0].values, ["M"]);
    }

    #[test]
    fn test_deserialize_article_by_handle() {
        let json = serde_json::json!({
            "blog": {
                "articleByHandle": {
                    "id": "gid://shopify/Article/7",
                    "handle": "caring-for-merino",
                    "title": "Caring for Merino",
                    "excerpt": null,
                    "publishedAt": "2025-10-02T09:00:00Z",
                    "tags": ["care"],
                    "authorV2": { "name": "Ines" },
                    "image": null,
                    "seo": { "title": null, "description": "Wash cold" },
                    "contentHtml": "<p>Wash cold.</p>"
                }
            }
        });
        let data: get_article::ResponseData = serde_json::from_value(json).unwrap();
        let article = data.blog.unwrap().article_by_handle.unwrap();
        assert_eq!(article.fields.author.unwrap().name, "Ines");
        assert_eq!(article.content_html, "<p>Wash cold.</p>");

        let body = GetArticle::build_query(get_article::Variables {
            blog_handle: "news".to_string(),
            handle: "caring-for-merino".to_string(),
        });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["variables"]["blogHandle"], "news");
        assert!(body.query.contains("fragment ArticleFields on Article"));
    }

    #[test]
    fn test_deserialize_nested_menu() {
        let json = serde_json::json!({
            "menu": {
                "handle": "main-menu",
                "title": "Main menu",
                "items": [{
                    "title": "Women",
                    "url": "https://kittaly.com/collections/women",
                    "items": [{ "title": "Knitwear", "url": "https://kittaly.com/search/knitwear", "items": [] }]
                }]
            }
        });
        let data: get_menu::ResponseData = serde_json::from_value(json).unwrap();
        let menu = data.menu.unwrap();
        assert_eq!(menu.items[0].items[0].title, "Knitwear");
    }
}
