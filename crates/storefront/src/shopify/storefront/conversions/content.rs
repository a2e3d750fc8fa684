//! Menu, page, blog and customer conversion functions.

use crate::shopify::types::{Article, Blog, CustomerUserError, Menu, MenuItem, Page};

use super::super::queries::fragments::ArticleFields;
use super::super::queries::{customer_create, get_article, get_blog, get_menu, get_page};
use super::products::{convert_image, convert_seo};

pub fn convert_menu(menu: get_menu::Menu) -> Menu {
    Menu {
        handle: menu.handle,
        title: menu.title,
        items: menu.items.into_iter().map(convert_menu_item).collect(),
    }
}

fn convert_menu_item(item: get_menu::MenuItem) -> MenuItem {
    MenuItem {
        title: item.title,
        url: item.url.filter(|url| !url.trim().is_empty()),
        items: item.items.into_iter().map(convert_menu_item).collect(),
    }
}

pub fn convert_page(page: get_page::Page) -> Page {
    Page {
        id: page.id,
        handle: page.handle,
        title: page.title,
        body: page.body,
        body_summary: page.body_summary,
        seo: page.seo.map(convert_seo),
        created_at: page.created_at,
        updated_at: page.updated_at,
    }
}

pub fn convert_blog(blog: get_blog::Blog) -> Blog {
    Blog {
        handle: blog.handle,
        title: blog.title,
        articles: blog
            .articles
            .into_nodes()
            .map(|fields| convert_article_fields(fields, String::new()))
            .collect(),
    }
}

pub fn convert_article(article: get_article::Article) -> Article {
    convert_article_fields(article.fields, article.content_html)
}

fn convert_article_fields(fields: ArticleFields, content_html: String) -> Article {
    Article {
        id: fields.id,
        handle: fields.handle,
        title: fields.title,
        excerpt: fields.excerpt.filter(|text| !text.trim().is_empty()),
        content_html,
        published_at: fields.published_at,
        author_name: fields.author.map(|author| author.name),
        tags: fields.tags,
        image: fields.image.map(convert_image),
        seo: fields.seo.map(convert_seo),
    }
}

pub fn convert_user_error(e: customer_create::CustomerUserError) -> CustomerUserError {
    CustomerUserError {
        code: e.code,
        field: e.field.unwrap_or_default(),
        message: e.message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_menu_drops_blank_urls() {
        let raw = get_menu::Menu {
            handle: "main-menu".to_string(),
            title: "Main".to_string(),
            items: vec![get_menu::MenuItem {
                title: "Shop".to_string(),
                url: Some(" ".to_string()),
                items: vec![get_menu::MenuItem {
                    title: "Jumpers".to_string(),
                    url: Some("https://kittaly.com/search/jumpers".to_string()),
                    items: vec![],
                }],
            }],
        };
        let menu = convert_menu(raw);
        assert!(menu.items[0].url.is_none());
        assert_eq!(
            menu.items[0].items[0].url.as_deref(),
            Some("https://kittaly.com/search/jumpers")
        );
    }

    #[test]
    fn test_convert_article_drops_blank_excerpt() {
        let article = convert_article(get_article::Article {
            fields: ArticleFields {
                id: "gid://shopify/Article/7".to_string(),
                handle: "caring-for-merino".to_string(),
                title: "Caring for Merino".to_string(),
                excerpt: Some("  ".to_string()),
                published_at: Some("2025-10-02T09:00:00Z".to_string()),
                tags: vec!["care".to_string()],
                author: None,
                image: None,
                seo: None,
            },
            content_html: "<p>Wash cold.</p>".to_string(),
        });
        assert!(article.excerpt.is_none());
        assert!(article.author_name.is_none());
        assert_eq!(article.content_html, "<p>Wash cold.</p>");
    }

    #[test]
    fn test_convert_user_error_without_field() {
        let err = convert_user_error(customer_create::CustomerUserError {
            code: Some("INVALID".to_string()),
            field: None,
            message: "Email is invalid".to_string(),
        });
        assert!(err.field.is_empty());
        assert!(!err.is_email_taken());
    }
}
