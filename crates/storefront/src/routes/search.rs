//! Product search route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use crate::bigcommerce::ProductSort;
use crate::content::DEFAULT_PAGE_SIZE;
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

use super::products::ProductCardView;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub after: Option<String>,
    #[serde(default)]
    pub sort: ProductSort,
}

/// Search results page template.
#[derive(Template, WebTemplate)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub term: String,
    pub products: Vec<ProductCardView>,
    pub next_cursor: Option<String>,
    pub sort_param: &'static str,
}

/// Display search results. An empty query renders the empty search page
/// without calling the API.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<SearchTemplate> {
    let term = query.q.unwrap_or_default();
    if term.trim().is_empty() {
        return Ok(SearchTemplate {
            term,
            products: Vec::new(),
            next_cursor: None,
            sort_param: query.sort.as_param(),
        });
    }

    let connection = state
        .bigcommerce()
        .search_products(term.trim(), DEFAULT_PAGE_SIZE, query.after, query.sort)
        .await?;

    let next_cursor = connection
        .page_info
        .has_next_page
        .then(|| connection.page_info.end_cursor.clone())
        .flatten();

    Ok(SearchTemplate {
        term,
        products: connection
            .edges
            .iter()
            .map(|edge| ProductCardView::from_summary(&edge.node))
            .collect(),
        next_cursor,
        sort_param: query.sort.as_param(),
    })
}
