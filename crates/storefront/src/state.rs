//! Application state shared across handlers.

use std::sync::Arc;

use crate::bigcommerce::BigCommerceClient;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Handlers construct a per-request
/// [`crate::cart::CartSynchronizer`] from the client held here; no cart
/// state lives in the process.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    bigcommerce: BigCommerceClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let bigcommerce = BigCommerceClient::new(&config.bigcommerce);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                bigcommerce,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the BigCommerce Storefront API client.
    #[must_use]
    pub fn bigcommerce(&self) -> &BigCommerceClient {
        &self.inner.bigcommerce
    }
}
