//! BigCommerce Storefront GraphQL API client.
//!
//! # Architecture
//!
//! - Raw GraphQL documents with shared fragments, executed over `reqwest`
//! - BigCommerce is the source of truth - no local sync, direct API calls
//! - In-memory caching via `moka` for catalog responses; cart and checkout
//!   calls are never cached
//!
//! # Example
//!
//! ```rust,ignore
//! use easel_storefront::bigcommerce::BigCommerceClient;
//!
//! let client = BigCommerceClient::new(&config.bigcommerce);
//!
//! // Get a product
//! let product = client.get_product_by_path("/french-field-easel/").await?;
//!
//! // Create a cart with one item
//! let cart = client.create_cart(&[CartLineInput {
//!     product_entity_id: product.entity_id,
//!     variant_entity_id: None,
//!     quantity: 1,
//! }]).await?;
//! ```

mod cache;
mod client;
pub mod conversions;
pub mod queries;
pub mod types;

pub use client::{BigCommerceClient, CartLineInput, ProductSort};

use thiserror::Error;

/// Errors that can occur when interacting with the BigCommerce API.
#[derive(Debug, Error)]
pub enum BigCommerceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by BigCommerce.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// A GraphQL error returned by the BigCommerce API.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    #[serde(default)]
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if let Some(loc) = e.locations.first() {
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}
