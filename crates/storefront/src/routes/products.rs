//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use easel_core::{BulkPricingTier, Money};
use serde::Deserialize;
use tracing::instrument;

use crate::bigcommerce::ProductSort;
use crate::bigcommerce::types::{Product, ProductSummary};
use crate::content::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, product_href};
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Product display data for cards (listings, search, related rails).
#[derive(Clone)]
pub struct ProductCardView {
    pub path: String,
    pub name: String,
    pub brand: Option<String>,
    pub description: String,
    pub image_url: Option<String>,
    pub image_alt: String,
    pub price: String,
    pub sale_price: Option<String>,
    /// Best available volume discount, e.g. `Some(25)` for "save up to 25%".
    pub max_save_percent: Option<u32>,
}

impl ProductCardView {
    #[must_use]
    pub fn from_summary(product: &ProductSummary) -> Self {
        let tiers = product.prices.tiers();
        let list = product.prices.price.to_money();
        let sale = product
            .prices
            .sale_price
            .as_ref()
            .map(|p| p.to_money())
            .filter(|sale| sale.amount < list.amount);

        Self {
            path: product_href(&product.path),
            name: product.name.clone(),
            brand: product.brand.as_ref().map(|b| b.name.clone()),
            description: product.plain_text_description.clone(),
            image_url: product.default_image.as_ref().map(|i| i.url.clone()),
            image_alt: product
                .default_image
                .as_ref()
                .map(|i| i.alt_text.clone())
                .filter(|alt| !alt.is_empty())
                .unwrap_or_else(|| product.name.clone()),
            price: list.display(),
            sale_price: sale.map(|p| p.display()),
            max_save_percent: tiers
                .iter()
                .map(|t| t.save_percent(list.amount))
                .max()
                .filter(|&pct| pct > 0),
        }
    }
}

/// One row of the volume pricing table on the detail page.
#[derive(Clone)]
pub struct TierView {
    /// Quantity range, e.g. `10 - 24` or `25+`.
    pub range: String,
    pub unit_price: String,
    pub save_percent: u32,
}

fn tier_views(tiers: &[BulkPricingTier], list: &Money) -> Vec<TierView> {
    tiers
        .iter()
        .map(|tier| TierView {
            range: tier.range_label(),
            unit_price: Money::new(tier.unit_price(list.amount), list.currency).display(),
            save_percent: tier.save_percent(list.amount),
        })
        .collect()
}

/// Variant display data for the detail page selector.
#[derive(Clone)]
pub struct VariantView {
    pub id: i64,
    pub sku: String,
    pub price: Option<String>,
    pub purchasable: bool,
}

/// Product detail display data.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub brand: Option<String>,
    /// Rendered HTML from the platform; emitted unescaped in the template.
    pub description_html: String,
    pub images: Vec<ImageView>,
    pub price: String,
    pub sale_price: Option<String>,
    pub tiers: Vec<TierView>,
    pub variants: Vec<VariantView>,
}

/// Image display data for templates.
#[derive(Clone)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

impl ProductDetailView {
    fn from_product(product: &Product) -> Self {
        let list = product.prices.price.to_money();
        let sale = product
            .prices
            .sale_price
            .as_ref()
            .map(|p| p.to_money())
            .filter(|sale| sale.amount < list.amount);

        let mut images: Vec<ImageView> = product
            .images
            .edges
            .iter()
            .map(|edge| ImageView {
                url: edge.node.url.clone(),
                alt: if edge.node.alt_text.is_empty() {
                    product.name.clone()
                } else {
                    edge.node.alt_text.clone()
                },
            })
            .collect();
        if images.is_empty()
            && let Some(default) = &product.default_image
        {
            images.push(ImageView {
                url: default.url.clone(),
                alt: product.name.clone(),
            });
        }

        Self {
            id: product.entity_id.as_i64(),
            name: product.name.clone(),
            sku: product.sku.clone(),
            brand: product.brand.as_ref().map(|b| b.name.clone()),
            description_html: product.description.clone(),
            images,
            price: list.display(),
            sale_price: sale.map(|p| p.display()),
            tiers: tier_views(&product.prices.tiers(), &list),
            variants: product
                .variants
                .edges
                .iter()
                .map(|edge| VariantView {
                    id: edge.node.entity_id.as_i64(),
                    sku: edge.node.sku.clone(),
                    price: edge
                        .node
                        .prices
                        .as_ref()
                        .map(|p| p.price.to_money().display()),
                    purchasable: edge.node.is_purchasable,
                })
                .collect(),
        }
    }
}

/// Pagination and sort query parameters for product listings.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub after: Option<String>,
    pub limit: Option<u32>,
    #[serde(default)]
    pub sort: ProductSort,
}

impl PaginationQuery {
    pub(crate) fn page_size(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

/// One `<option>` of the sort control.
pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

const SORT_CHOICES: &[(ProductSort, &str)] = &[
    (ProductSort::Featured, "Featured"),
    (ProductSort::LowestPrice, "Price: Low to High"),
    (ProductSort::HighestPrice, "Price: High to Low"),
    (ProductSort::Newest, "Newest"),
    (ProductSort::BestSelling, "Best Selling"),
];

pub(crate) fn sort_options(current: ProductSort) -> Vec<SortOption> {
    SORT_CHOICES
        .iter()
        .map(|&(sort, label)| SortOption {
            value: sort.as_param(),
            label,
            selected: sort == current,
        })
        .collect()
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCardView>,
    pub next_cursor: Option<String>,
    pub sort_options: Vec<SortOption>,
    pub sort_param: &'static str,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    pub related_products: Vec<ProductCardView>,
}

/// Display the product listing page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<ProductsIndexTemplate> {
    let connection = state
        .bigcommerce()
        .get_products(query.page_size(), query.after.clone(), query.sort)
        .await?;

    let next_cursor = connection
        .page_info
        .has_next_page
        .then(|| connection.page_info.end_cursor.clone())
        .flatten();

    Ok(ProductsIndexTemplate {
        products: connection
            .edges
            .iter()
            .map(|edge| ProductCardView::from_summary(&edge.node))
            .collect(),
        next_cursor,
        sort_options: sort_options(query.sort),
        sort_param: query.sort.as_param(),
    })
}

/// Display the product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ProductShowTemplate> {
    let path = format!("/{slug}/");
    let product = state.bigcommerce().get_product_by_path(&path).await?;

    Ok(ProductShowTemplate {
        product: ProductDetailView::from_product(&product),
        related_products: product
            .related_products
            .edges
            .iter()
            .map(|edge| ProductCardView::from_summary(&edge.node))
            .collect(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_options_mark_the_current_choice() {
        let options = sort_options(ProductSort::Newest);
        let selected: Vec<&str> = options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect();
        assert_eq!(selected, vec!["newest"]);
    }

    #[test]
    fn test_pagination_defaults_to_featured_sort() {
        let query: PaginationQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(query.sort, ProductSort::Featured);
        assert_eq!(query.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_pagination_parses_sort_from_query() {
        let query: PaginationQuery =
            serde_json::from_value(serde_json::json!({ "sort": "lowest_price" })).unwrap();
        assert_eq!(query.sort, ProductSort::LowestPrice);
    }
}
