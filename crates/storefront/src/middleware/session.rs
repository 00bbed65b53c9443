//! Session middleware configuration.
//!
//! The session stores one thing: the opaque BigCommerce cart identifier.
//! Cart contents always live remotely, so an in-memory store is enough; a
//! lost session only means the visitor starts with an empty cart.

use easel_core::CartId;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "easel_session";

/// Session key for the cart identifier.
pub const CART_ID_KEY: &str = "cart_id";

/// Session expiry: 30 days of inactivity, matching how long the remote
/// platform keeps an abandoned cart around.
const SESSION_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Create the session layer.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Get the cart identifier from the session.
pub async fn get_cart_id(session: &Session) -> Option<CartId> {
    session.get::<CartId>(CART_ID_KEY).await.ok().flatten()
}

/// Persist the cart identifier, or remove it when the cart is gone.
pub async fn store_cart_id(session: &Session, cart_id: Option<&CartId>) {
    let result = match cart_id {
        Some(id) => session.insert(CART_ID_KEY, id).await,
        None => session.remove::<CartId>(CART_ID_KEY).await.map(|_| ()),
    };
    if let Err(e) = result {
        tracing::error!(error = %e, "failed to update cart id in session");
    }
}
