//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /products               - Product listing
//! GET  /products/:slug         - Product detail
//! GET  /collections            - Collection listing
//! GET  /collections/*slug      - Collection detail (nested category paths)
//! GET  /search                 - Product search
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout               - Redirect to hosted BigCommerce checkout
//!
//! # Pages
//! GET  /about                  - About page
//! GET  /quote                  - Bulk-order quote form
//! POST /quote                  - Submit quote request
//! POST /newsletter             - Newsletter signup (fragment)
//! ```

pub mod cart;
pub mod collections;
pub mod home;
pub mod pages;
pub mod products;
pub mod quote;
pub mod search;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the main router with all storefront routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/products", get(products::index))
        .route("/products/{slug}", get(products::show))
        .route("/collections", get(collections::index))
        .route("/collections/{*slug}", get(collections::show))
        .route("/search", get(search::index))
        .nest("/cart", cart_routes())
        .route("/checkout", get(cart::checkout))
        .route("/about", get(pages::about))
        .route("/quote", get(quote::show).post(quote::submit))
        .route("/newsletter", post(pages::newsletter_signup))
        .fallback(pages::not_found)
}
