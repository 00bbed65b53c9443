//! Cache value types for catalog responses.

use super::types::{CategoryTreeItem, CategoryWithProducts, Connection, Product, ProductSummary};

/// Cached catalog responses, keyed by a per-method string key.
///
/// Cart responses are deliberately absent. Cart state is mutable and must
/// always be read from the API.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(Connection<ProductSummary>),
    Product(Box<Product>),
    Categories(Vec<CategoryTreeItem>),
    Category(Box<CategoryWithProducts>),
}
