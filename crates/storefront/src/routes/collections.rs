//! Collection (category) route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use tracing::instrument;

use crate::bigcommerce::types::CategoryTreeItem;
use crate::content::collection_href;
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

use super::products::{PaginationQuery, ProductCardView, SortOption, sort_options};

/// Collection display data for the index grid.
#[derive(Clone)]
pub struct CollectionCardView {
    pub path: String,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
}

impl CollectionCardView {
    fn from_tree_item(item: &CategoryTreeItem) -> Self {
        Self {
            path: collection_href(&item.path),
            name: item.name.clone(),
            description: item.description.clone(),
            image_url: item.image.as_ref().map(|i| i.url.clone()),
        }
    }
}

/// Top-level categories for the home page rail.
#[must_use]
pub fn preview(tree: &[CategoryTreeItem], limit: usize) -> Vec<CollectionCardView> {
    tree.iter()
        .take(limit)
        .map(CollectionCardView::from_tree_item)
        .collect()
}

/// Collection listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "collections/index.html")]
pub struct CollectionsIndexTemplate {
    pub collections: Vec<CollectionCardView>,
}

/// Collection detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "collections/show.html")]
pub struct CollectionShowTemplate {
    pub name: String,
    pub description: String,
    pub products: Vec<ProductCardView>,
    pub next_cursor: Option<String>,
    pub sort_options: Vec<SortOption>,
    pub sort_param: &'static str,
}

/// Display the collection listing page from the category tree.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<CollectionsIndexTemplate> {
    let tree = state.bigcommerce().get_category_tree().await?;

    Ok(CollectionsIndexTemplate {
        collections: tree.iter().map(CollectionCardView::from_tree_item).collect(),
    })
}

/// Display a collection with its products.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PaginationQuery>,
) -> Result<CollectionShowTemplate> {
    let path = format!("/{slug}/");
    let category = state
        .bigcommerce()
        .get_category_by_path(&path, query.page_size(), query.after.clone(), query.sort)
        .await?;

    let next_cursor = category
        .products
        .page_info
        .has_next_page
        .then(|| category.products.page_info.end_cursor.clone())
        .flatten();

    Ok(CollectionShowTemplate {
        name: category.name,
        description: category.description,
        products: category
            .products
            .edges
            .iter()
            .map(|edge| ProductCardView::from_summary(&edge.node))
            .collect(),
        next_cursor,
        sort_options: sort_options(query.sort),
        sort_param: query.sort.as_param(),
    })
}
