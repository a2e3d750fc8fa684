//! Collection type conversion functions.

use crate::shopify::types::{Collection, CollectionConnection, CollectionImage};

use super::super::queries::{get_collection_by_handle, get_collection_image, get_collections};
use super::products::{convert_image, convert_page_info, convert_product_fields, convert_seo};

pub fn convert_collection(collection: get_collection_by_handle::Collection) -> Collection {
    Collection {
        id: collection.id,
        handle: collection.handle,
        title: collection.title,
        description: collection.description,
        description_html: collection.description_html,
        updated_at: collection.updated_at,
        seo: collection.seo.map(convert_seo),
        image: collection.image.map(convert_image),
        products: collection
            .products
            .into_nodes()
            .map(convert_product_fields)
            .collect(),
    }
}

pub fn convert_collection_connection(conn: get_collections::Collections) -> CollectionConnection {
    CollectionConnection {
        collections: conn
            .edges
            .into_iter()
            .map(|e| {
                let node = e.node;
                Collection {
                    id: node.id,
                    handle: node.handle,
                    title: node.title,
                    description: node.description,
                    description_html: node.description_html,
                    updated_at: node.updated_at,
                    seo: node.seo.map(convert_seo),
                    image: node.image.map(convert_image),
                    products: vec![],
                }
            })
            .collect(),
        page_info: convert_page_info(conn.page_info),
    }
}

pub fn convert_collection_image(collection: get_collection_image::Collection) -> CollectionImage {
    CollectionImage {
        title: collection.title,
        image: collection.image.map(convert_image),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_collection_connection() {
        let json = serde_json::json!({
            "edges": [
                { "node": {
                    "id": "c1", "handle": "knitwear", "title": "Knitwear",
                    "description": "", "descriptionHtml": "", "updatedAt": null,
                    "seo": null,
                    "image": { "id": null, "url": "https://cdn.shopify.com/knit.jpg", "altText": null, "width": null, "height": null }
                } },
                { "node": {
                    "id": "c2", "handle": "sale", "title": "Sale",
                    "description": "", "descriptionHtml": "", "updatedAt": null,
                    "seo": null, "image": null
                } }
            ],
            "pageInfo": { "hasNextPage": true, "endCursor": "abc" }
        });
        let raw: get_collections::Collections = serde_json::from_value(json).unwrap();
        let conn = convert_collection_connection(raw);

        assert_eq!(conn.collections.len(), 2);
        assert!(conn.collections[0].image.is_some());
        assert!(conn.collections[1].image.is_none());
        assert!(conn.page_info.has_next_page);
        assert_eq!(conn.page_info.end_cursor.as_deref(), Some("abc"));
    }

    #[test]
    fn test_convert_collection_image_without_image() {
        let raw = get_collection_image::Collection {
            title: "Gifts".to_string(),
            image: None,
        };
        let converted = convert_collection_image(raw);
        assert_eq!(converted.title, "Gifts");
        assert!(converted.image.is_none());
    }
}
