//! BigCommerce Storefront API client implementation.
//!
//! Executes raw GraphQL documents over `reqwest`. Catalog responses are
//! cached with `moka` (30-minute TTL); cart operations always hit the API.

use std::sync::Arc;
use std::time::Duration;

use easel_core::{CartId, LineItemId, ProductId, VariantId};
use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};
use url::Url;

use crate::config::BigCommerceConfig;

use super::cache::CacheValue;
use super::conversions::convert_cart;
use super::types::{
    CartMutationData, CartSite, CategoryTreeItem, CategoryTreeSite, CategoryWithProducts,
    Connection, FeaturedProductsSite, GraphQLResponse, Product, ProductSummary, RouteSite,
    SearchSite, SiteResponse,
};
use super::{BigCommerceError, GraphQLError, queries};
use crate::cart::CartSnapshot;

const CACHE_CAPACITY: u64 = 1000;
const CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Client for the BigCommerce Storefront GraphQL API.
///
/// Cheap to clone; all state lives behind an `Arc`.
#[derive(Clone)]
pub struct BigCommerceClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    client: reqwest::Client,
    endpoint: String,
    token: String,
    cache: Cache<String, CacheValue>,
}

/// Sort order for product listings. The variants cover the values shared by
/// the API's `SearchProductsSortInput` and `CategoryProductSort` enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Featured,
    LowestPrice,
    HighestPrice,
    Newest,
    BestSelling,
}

impl ProductSort {
    /// GraphQL enum value sent as the `sort` variable.
    #[must_use]
    pub const fn as_graphql(self) -> &'static str {
        match self {
            Self::Featured => "FEATURED",
            Self::LowestPrice => "LOWEST_PRICE",
            Self::HighestPrice => "HIGHEST_PRICE",
            Self::Newest => "NEWEST",
            Self::BestSelling => "BEST_SELLING",
        }
    }

    /// Query-string value used in links and the sort control.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::LowestPrice => "lowest_price",
            Self::HighestPrice => "highest_price",
            Self::Newest => "newest",
            Self::BestSelling => "best_selling",
        }
    }
}

/// A line item to add when creating a cart or appending to one.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    pub product_entity_id: ProductId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_entity_id: Option<VariantId>,
    pub quantity: u32,
}

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

impl BigCommerceClient {
    /// Create a new Storefront API client.
    #[must_use]
    pub fn new(config: &BigCommerceConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(ClientInner {
                client: reqwest::Client::new(),
                endpoint: config.graphql_endpoint(),
                token: config
                    .customer_impersonation_token
                    .expose_secret()
                    .to_string(),
                cache,
            }),
        }
    }

    /// Execute a GraphQL document.
    async fn execute<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: serde_json::Value,
    ) -> Result<T, BigCommerceError> {
        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .bearer_auth(&self.inner.token)
            .header("Content-Type", "application/json")
            .json(&GraphQLRequest {
                query: document,
                variables,
            })
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
            return Err(BigCommerceError::RateLimited(retry_after));
        }

        // Read the body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "BigCommerce API returned non-success status"
            );
            return Err(BigCommerceError::GraphQL(vec![GraphQLError {
                message: format!(
                    "HTTP {status}: {}",
                    response_text.chars().take(200).collect::<String>()
                ),
                locations: vec![],
                path: vec![],
            }]));
        }

        let response: GraphQLResponse<T> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse BigCommerce GraphQL response"
                );
                return Err(BigCommerceError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            tracing::debug!(errors = ?errors, "GraphQL errors in response");
            return Err(BigCommerceError::GraphQL(errors));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %response_text.chars().take(500).collect::<String>(),
                "BigCommerce GraphQL response has no data and no errors"
            );
            BigCommerceError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                locations: vec![],
                path: vec![],
            }])
        })
    }

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// Get a paginated, sorted list of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        first: u32,
        after: Option<String>,
        sort: ProductSort,
    ) -> Result<Connection<ProductSummary>, BigCommerceError> {
        let cache_key = format!(
            "products:{first}:{}:{}",
            after.as_deref().unwrap_or(""),
            sort.as_param()
        );

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let document = queries::with_fragments(queries::GET_PRODUCTS, &[queries::PRODUCT_FIELDS]);
        let data: SiteResponse<SearchSite> = self
            .execute(
                &document,
                serde_json::json!({ "first": first, "after": after, "sort": sort.as_graphql() }),
            )
            .await?;

        let connection = data.site.search.search_products.products;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(connection.clone()))
            .await;

        Ok(connection)
    }

    /// Get featured products for the home page.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_featured_products(
        &self,
        first: u32,
    ) -> Result<Vec<ProductSummary>, BigCommerceError> {
        let cache_key = format!("featured:{first}");

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for featured products");
            return Ok(products.into_nodes());
        }

        let document =
            queries::with_fragments(queries::GET_FEATURED_PRODUCTS, &[queries::PRODUCT_FIELDS]);
        let data: SiteResponse<FeaturedProductsSite> = self
            .execute(&document, serde_json::json!({ "first": first }))
            .await?;

        let connection = data.site.featured_products;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(connection.clone()))
            .await;

        Ok(connection.into_nodes())
    }

    /// Get a product by its URL path.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no product lives at the path, or an error if the
    /// API request fails.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get_product_by_path(&self, path: &str) -> Result<Product, BigCommerceError> {
        let cache_key = format!("product:{path}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let document = queries::with_fragments(
            queries::GET_PRODUCT_BY_PATH,
            &[queries::PRODUCT_DETAIL_FIELDS, queries::PRODUCT_FIELDS],
        );
        let data: SiteResponse<RouteSite<Product>> = self
            .execute(&document, serde_json::json!({ "path": path }))
            .await?;

        let product = data
            .site
            .route
            .node
            .ok_or_else(|| BigCommerceError::NotFound(format!("Product not found: {path}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Full-text product search. Not cached; search terms are unbounded.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(term = %term))]
    pub async fn search_products(
        &self,
        term: &str,
        first: u32,
        after: Option<String>,
        sort: ProductSort,
    ) -> Result<Connection<ProductSummary>, BigCommerceError> {
        let document =
            queries::with_fragments(queries::SEARCH_PRODUCTS, &[queries::PRODUCT_FIELDS]);
        let data: SiteResponse<SearchSite> = self
            .execute(
                &document,
                serde_json::json!({
                    "searchTerm": term,
                    "first": first,
                    "after": after,
                    "sort": sort.as_graphql(),
                }),
            )
            .await?;

        Ok(data.site.search.search_products.products)
    }

    /// Get the category tree for navigation and the collections index.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_category_tree(&self) -> Result<Vec<CategoryTreeItem>, BigCommerceError> {
        let cache_key = "categories".to_string();

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for category tree");
            return Ok(categories);
        }

        let data: SiteResponse<CategoryTreeSite> = self
            .execute(queries::GET_CATEGORY_TREE, serde_json::json!({}))
            .await?;

        let categories = data.site.category_tree;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    /// Get a category by its URL path, with its products.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no category lives at the path, or an error if
    /// the API request fails.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get_category_by_path(
        &self,
        path: &str,
        first: u32,
        after: Option<String>,
        sort: ProductSort,
    ) -> Result<CategoryWithProducts, BigCommerceError> {
        let cache_key = format!(
            "category:{path}:{}:{}",
            after.as_deref().unwrap_or(""),
            sort.as_param()
        );

        if let Some(CacheValue::Category(category)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for category");
            return Ok(*category);
        }

        let document =
            queries::with_fragments(queries::GET_CATEGORY_BY_PATH, &[queries::PRODUCT_FIELDS]);
        let data: SiteResponse<RouteSite<CategoryWithProducts>> = self
            .execute(
                &document,
                serde_json::json!({
                    "path": path,
                    "first": first,
                    "after": after,
                    "sort": sort.as_graphql(),
                }),
            )
            .await?;

        let category = data
            .site
            .route
            .node
            .ok_or_else(|| BigCommerceError::NotFound(format!("Category not found: {path}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Category(Box::new(category.clone())))
            .await;

        Ok(category)
    }

    // =========================================================================
    // Cart Methods (not cached - mutable state)
    // =========================================================================

    /// Get an existing cart. Returns `Ok(None)` when the cart no longer
    /// exists (expired or converted to an order).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn get_cart(
        &self,
        cart_id: &CartId,
    ) -> Result<Option<CartSnapshot>, BigCommerceError> {
        let document = queries::with_fragments(queries::GET_CART, &[queries::CART_FIELDS]);
        let data: SiteResponse<CartSite> = self
            .execute(
                &document,
                serde_json::json!({ "entityId": cart_id.as_str() }),
            )
            .await?;

        Ok(data.site.cart.map(convert_cart))
    }

    /// Create a new cart with the given line items.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns no cart.
    #[instrument(skip(self, lines))]
    pub async fn create_cart(
        &self,
        lines: &[CartLineInput],
    ) -> Result<CartSnapshot, BigCommerceError> {
        let document = queries::with_fragments(queries::CREATE_CART, &[queries::CART_FIELDS]);
        let data: CartMutationData = self
            .execute(&document, serde_json::json!({ "lineItems": lines }))
            .await?;

        let cart = data
            .cart
            .create_cart
            .and_then(|payload| payload.cart)
            .ok_or_else(|| missing_cart("createCart"))?;

        Ok(convert_cart(cart))
    }

    /// Add line items to an existing cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart no longer exists or the request fails.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn add_cart_line_items(
        &self,
        cart_id: &CartId,
        lines: &[CartLineInput],
    ) -> Result<CartSnapshot, BigCommerceError> {
        let document =
            queries::with_fragments(queries::ADD_CART_LINE_ITEMS, &[queries::CART_FIELDS]);
        let data: CartMutationData = self
            .execute(
                &document,
                serde_json::json!({
                    "cartEntityId": cart_id.as_str(),
                    "lineItems": lines,
                }),
            )
            .await?;

        let cart = data
            .cart
            .add_cart_line_items
            .and_then(|payload| payload.cart)
            .ok_or_else(|| missing_cart("addCartLineItems"))?;

        Ok(convert_cart(cart))
    }

    /// Set the quantity of a single line item.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart or line item no longer exists or the
    /// request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id, line_item_id = %line_item_id))]
    pub async fn update_cart_line_item(
        &self,
        cart_id: &CartId,
        line_item_id: &LineItemId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartSnapshot, BigCommerceError> {
        let document =
            queries::with_fragments(queries::UPDATE_CART_LINE_ITEM, &[queries::CART_FIELDS]);
        let data: CartMutationData = self
            .execute(
                &document,
                serde_json::json!({
                    "cartEntityId": cart_id.as_str(),
                    "lineItemEntityId": line_item_id.as_str(),
                    "productEntityId": product_id,
                    "quantity": quantity,
                }),
            )
            .await?;

        let cart = data
            .cart
            .update_cart_line_item
            .and_then(|payload| payload.cart)
            .ok_or_else(|| missing_cart("updateCartLineItem"))?;

        Ok(convert_cart(cart))
    }

    /// Remove a line item from the cart. Returns `Ok(None)` when the removal
    /// emptied the cart; BigCommerce deletes empty carts.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart no longer exists or the request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id, line_item_id = %line_item_id))]
    pub async fn delete_cart_line_item(
        &self,
        cart_id: &CartId,
        line_item_id: &LineItemId,
    ) -> Result<Option<CartSnapshot>, BigCommerceError> {
        let document =
            queries::with_fragments(queries::DELETE_CART_LINE_ITEM, &[queries::CART_FIELDS]);
        let data: CartMutationData = self
            .execute(
                &document,
                serde_json::json!({
                    "cartEntityId": cart_id.as_str(),
                    "lineItemEntityId": line_item_id.as_str(),
                }),
            )
            .await?;

        let payload = data
            .cart
            .delete_cart_line_item
            .ok_or_else(|| missing_cart("deleteCartLineItem"))?;

        Ok(payload.cart.map(convert_cart))
    }

    /// Get the hosted checkout URL for a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart no longer exists, the request fails, or
    /// the returned URL does not parse.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn create_checkout_redirect(
        &self,
        cart_id: &CartId,
    ) -> Result<Url, BigCommerceError> {
        let data: CartMutationData = self
            .execute(
                queries::CREATE_CHECKOUT_REDIRECT,
                serde_json::json!({ "cartEntityId": cart_id.as_str() }),
            )
            .await?;

        let redirect = data
            .cart
            .create_cart_redirect_urls
            .ok_or_else(|| missing_cart("createCartRedirectUrls"))?;

        Url::parse(&redirect.redirect_urls.redirected_checkout_url).map_err(|e| {
            BigCommerceError::GraphQL(vec![GraphQLError {
                message: format!("Invalid checkout URL: {e}"),
                locations: vec![],
                path: vec![],
            }])
        })
    }
}

fn missing_cart(operation: &str) -> BigCommerceError {
    BigCommerceError::GraphQL(vec![GraphQLError {
        message: format!("{operation} returned no cart"),
        locations: vec![],
        path: vec![],
    }])
}
