//! Blog article handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use chrono::DateTime;
use tracing::instrument;

use super::layout::SiteLayout;
use super::structured_data;
use crate::error::Result;
use crate::filters;
use crate::shopify::types::Article;
use crate::state::AppState;

/// Articles fetched for the index.
const ARTICLES_PER_PAGE: i64 = 50;

/// Number of other articles shown under an article.
const RELATED_ARTICLES_COUNT: usize = 3;

/// Tags shown on an index card.
const CARD_TAG_COUNT: usize = 3;

/// Article view for templates.
#[derive(Clone)]
pub struct ArticleView {
    pub handle: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    /// Raw ISO 8601 timestamp for `<time datetime>`.
    pub published_at: Option<String>,
    /// e.g. "2 October 2025".
    pub published_display: Option<String>,
    pub image: Option<String>,
    pub image_alt: String,
    pub tags: Vec<String>,
    pub content_html: String,
}

impl From<&Article> for ArticleView {
    fn from(article: &Article) -> Self {
        Self {
            handle: article.handle.clone(),
            title: article.title.clone(),
            excerpt: article.excerpt.clone(),
            author: article.author_name.clone(),
            published_at: article.published_at.clone(),
            published_display: article.published_at.as_deref().and_then(display_date),
            image: article.image.as_ref().map(|img| img.url.clone()),
            image_alt: article
                .image
                .as_ref()
                .and_then(|img| img.alt_text.clone())
                .unwrap_or_else(|| article.title.clone()),
            tags: article.tags.clone(),
            content_html: article.content_html.clone(),
        }
    }
}

impl ArticleView {
    /// Tags shown on an index card.
    #[must_use]
    pub fn card_tags(&self) -> &[String] {
        self.tags.get(..CARD_TAG_COUNT).unwrap_or(&self.tags)
    }
}

fn display_date(raw: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.format("%-d %B %Y").to_string())
}

/// Article index template.
#[derive(Template, WebTemplate)]
#[template(path = "articles/index.html")]
pub struct ArticlesIndexTemplate {
    pub layout: SiteLayout,
    /// Most recent article, shown large.
    pub featured: Option<ArticleView>,
    pub articles: Vec<ArticleView>,
}

/// Article detail template.
#[derive(Template, WebTemplate)]
#[template(path = "articles/show.html")]
pub struct ArticleShowTemplate {
    pub layout: SiteLayout,
    pub article: ArticleView,
    pub description: String,
    pub related: Vec<ArticleView>,
    /// `BlogPosting` JSON-LD.
    pub article_json_ld: String,
    /// `BreadcrumbList` JSON-LD.
    pub breadcrumb_json_ld: String,
}

/// Display the article index, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let layout = SiteLayout::load(&state).await;

    let mut articles: Vec<ArticleView> = state
        .storefront()
        .get_blog(&state.site().blog_handle, ARTICLES_PER_PAGE)
        .await
        .map_or_else(
            |e| {
                tracing::error!("Failed to fetch blog: {e}");
                Vec::new()
            },
            |blog| blog.articles.iter().map(ArticleView::from).collect(),
        );

    let featured = (!articles.is_empty()).then(|| articles.remove(0));

    ArticlesIndexTemplate {
        layout,
        featured,
        articles,
    }
}

/// Display a single article with a few others from the same blog.
///
/// # Errors
///
/// Returns 404 if the article doesn't exist.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<impl IntoResponse> {
    let layout = SiteLayout::load(&state).await;
    let site = state.site();
    let article = state
        .storefront()
        .get_article(&site.blog_handle, &handle)
        .await?;

    let related = state
        .storefront()
        .get_blog(&site.blog_handle, ARTICLES_PER_PAGE)
        .await
        .map_or_else(
            |e| {
                tracing::warn!("Failed to fetch related articles: {e}");
                Vec::new()
            },
            |blog| related_articles(&blog.articles, &article.handle),
        );

    let base_url = &state.config().base_url;
    let article_path = format!("/articles/{}", article.handle);
    let article_json_ld = structured_data::script_body(&structured_data::article(
        &article,
        &site.site_name,
        base_url,
    ));
    let breadcrumb_json_ld = structured_data::script_body(&structured_data::breadcrumbs(
        &[
            ("Home", "/"),
            ("Articles", "/articles"),
            (article.title.as_str(), article_path.as_str()),
        ],
        base_url,
    ));

    let description = article
        .seo
        .as_ref()
        .and_then(|seo| seo.description.clone())
        .or_else(|| article.excerpt.clone())
        .unwrap_or_default();

    Ok(ArticleShowTemplate {
        layout,
        article: ArticleView::from(&article),
        description,
        related,
        article_json_ld,
        breadcrumb_json_ld,
    })
}

/// The first few articles other than `current`, in blog order.
fn related_articles(articles: &[Article], current: &str) -> Vec<ArticleView> {
    articles
        .iter()
        .filter(|a| a.handle != current)
        .take(RELATED_ARTICLES_COUNT)
        .map(ArticleView::from)
        .collect()
}

/// Create the articles routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/{handle}", get(show))
}
