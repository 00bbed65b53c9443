//! Wire types for the BigCommerce Storefront GraphQL API.
//!
//! These structs mirror the shape of the GraphQL documents in
//! [`super::queries`] and deserialize directly from the JSON response. All
//! field names follow the API's camelCase convention via serde renaming.

use easel_core::{
    BrandId, BulkPricingTier, CartId, CategoryId, CurrencyCode, LineItemId, Money, ProductId,
    TierDiscount, VariantId,
};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Top-level GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<super::GraphQLError>>,
}

/// A monetary value as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyValue {
    pub value: Decimal,
    pub currency_code: CurrencyCode,
}

impl MoneyValue {
    #[must_use]
    pub fn to_money(&self) -> Money {
        Money::new(self.value, self.currency_code)
    }
}

/// Relay-style pagination info.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    #[serde(default)]
    pub start_cursor: Option<String>,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// Relay-style connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default = "PageInfo::exhausted")]
    pub page_info: PageInfo,
    pub edges: Vec<Edge<T>>,
}

impl PageInfo {
    fn exhausted() -> Self {
        Self {
            has_next_page: false,
            has_previous_page: false,
            start_cursor: None,
            end_cursor: None,
        }
    }
}

impl<T> Connection<T> {
    /// Unwrap the edges into plain nodes.
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|e| e.node).collect()
    }

    fn empty() -> Self {
        Self {
            page_info: PageInfo::exhausted(),
            edges: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

// =============================================================================
// Catalog
// =============================================================================

/// Product pricing block, including volume discount tiers.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prices {
    pub price: MoneyValue,
    #[serde(default)]
    pub sale_price: Option<MoneyValue>,
    #[serde(default)]
    pub base_price: Option<MoneyValue>,
    #[serde(default)]
    pub bulk_pricing: Vec<RawBulkTier>,
}

impl Prices {
    /// Volume discount tiers in domain form, sorted by minimum quantity.
    #[must_use]
    pub fn tiers(&self) -> Vec<BulkPricingTier> {
        let mut tiers: Vec<BulkPricingTier> =
            self.bulk_pricing.iter().filter_map(RawBulkTier::to_tier).collect();
        tiers.sort_by_key(|t| t.min_quantity);
        tiers
    }
}

/// A bulk pricing rule as the API ships it, before classification.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBulkTier {
    pub minimum_quantity: u32,
    #[serde(default)]
    pub maximum_quantity: Option<u32>,
    pub discount: Decimal,
    #[serde(rename = "type")]
    pub kind: String,
}

impl RawBulkTier {
    /// Classify the rule into a typed tier. Unknown rule types are dropped
    /// rather than mispriced.
    #[must_use]
    pub fn to_tier(&self) -> Option<BulkPricingTier> {
        let discount = match self.kind.as_str() {
            "PERCENT" | "PERCENT_OFF" => TierDiscount::PercentOff(self.discount),
            "PRICE" | "PRICE_OFF" => TierDiscount::PriceOff(self.discount),
            "FIXED" | "FIXED_PRICE" => TierDiscount::FixedPrice(self.discount),
            _ => return None,
        };
        Some(BulkPricingTier {
            min_quantity: self.minimum_quantity,
            max_quantity: self.maximum_quantity,
            discount,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub entity_id: BrandId,
    pub name: String,
    #[serde(default)]
    pub path: String,
}

/// Product as it appears in lists, search results, and related-product rails.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub entity_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub sku: String,
    pub path: String,
    #[serde(default)]
    pub plain_text_description: String,
    #[serde(default)]
    pub default_image: Option<ProductImage>,
    pub prices: Prices,
    #[serde(default)]
    pub brand: Option<Brand>,
}

/// Full product for the detail page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub entity_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub sku: String,
    pub path: String,
    #[serde(default)]
    pub plain_text_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default_image: Option<ProductImage>,
    #[serde(default = "Connection::empty")]
    pub images: Connection<ProductImage>,
    pub prices: Prices,
    #[serde(default)]
    pub brand: Option<Brand>,
    #[serde(default = "Connection::empty")]
    pub variants: Connection<Variant>,
    #[serde(default = "Connection::empty")]
    pub related_products: Connection<ProductSummary>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub entity_id: VariantId,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub is_purchasable: bool,
    #[serde(default)]
    pub default_image: Option<ProductImage>,
    #[serde(default)]
    pub prices: Option<Prices>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryImage {
    pub url: String,
    #[serde(default)]
    pub alt_text: String,
}

/// Node in the category tree. Children nest two levels deep per the query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTreeItem {
    pub entity_id: CategoryId,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<CategoryImage>,
    #[serde(default)]
    pub children: Vec<CategoryTreeItem>,
}

/// Category resolved by route, with its product listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithProducts {
    pub entity_id: CategoryId,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub description: String,
    pub products: Connection<ProductSummary>,
}

// =============================================================================
// Cart
// =============================================================================

/// Cart as returned by every cart query and mutation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub entity_id: CartId,
    pub currency_code: CurrencyCode,
    pub amount: MoneyValue,
    pub line_items: CartLineItems,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItems {
    #[serde(default)]
    pub physical_items: Vec<CartItem>,
    #[serde(default)]
    pub digital_items: Vec<CartItem>,
    pub total_quantity: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub entity_id: LineItemId,
    pub product_entity_id: ProductId,
    #[serde(default)]
    pub variant_entity_id: Option<VariantId>,
    #[serde(default)]
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub quantity: u32,
    pub list_price: MoneyValue,
    #[serde(default)]
    pub sale_price: Option<MoneyValue>,
}

// =============================================================================
// Response envelopes
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SiteResponse<T> {
    pub site: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedProductsSite {
    pub featured_products: Connection<ProductSummary>,
}

#[derive(Debug, Deserialize)]
pub struct SearchSite {
    pub search: SearchProducts,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchProducts {
    pub search_products: SearchProductsResult,
}

#[derive(Debug, Deserialize)]
pub struct SearchProductsResult {
    pub products: Connection<ProductSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTreeSite {
    pub category_tree: Vec<CategoryTreeItem>,
}

/// Route lookup wrapper. `node` is null when no resource lives at the path,
/// or deserializes to `None` when the node is a different resource type.
#[derive(Debug, Deserialize)]
pub struct RouteSite<T> {
    pub route: Route<T>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Route<T> {
    #[serde(default)]
    pub node: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct CartSite {
    pub cart: Option<Cart>,
}

#[derive(Debug, Deserialize)]
pub struct CartMutationData {
    pub cart: CartMutationResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationResult {
    #[serde(default)]
    pub create_cart: Option<CartPayload>,
    #[serde(default)]
    pub add_cart_line_items: Option<CartPayload>,
    #[serde(default)]
    pub update_cart_line_item: Option<CartPayload>,
    #[serde(default)]
    pub delete_cart_line_item: Option<CartPayload>,
    #[serde(default)]
    pub create_cart_redirect_urls: Option<RedirectUrlsPayload>,
}

/// Mutation payload carrying the updated cart. `cart` is null after the last
/// line item is deleted.
#[derive(Debug, Deserialize)]
pub struct CartPayload {
    pub cart: Option<Cart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectUrlsPayload {
    pub redirect_urls: RedirectUrls,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectUrls {
    pub redirected_checkout_url: String,
    #[serde(default)]
    pub embedded_checkout_url: Option<String>,
}
