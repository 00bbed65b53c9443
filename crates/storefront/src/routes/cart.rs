//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The session holds only the opaque cart identifier; every handler builds a
//! fresh [`CartSynchronizer`] around it and writes the (possibly changed)
//! identifier back afterwards.

use std::num::NonZeroU32;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use easel_core::{LineItemId, ProductId, VariantId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::bigcommerce::BigCommerceClient;
use crate::cart::{CartState, CartSynchronizer};
use crate::filters;
use crate::middleware::session::{get_cart_id, store_cart_id};
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub line_id: String,
    pub path: String,
    pub name: String,
    pub sku: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
    pub image_url: Option<String>,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl From<&CartState> for CartView {
    fn from(state: &CartState) -> Self {
        Self {
            items: state
                .items
                .iter()
                .map(|item| CartItemView {
                    line_id: item.id.as_str().to_string(),
                    path: item.path.clone(),
                    name: item.name.clone(),
                    sku: item.sku.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price().display(),
                    line_total: item.line_total().display(),
                    image_url: item.image_url.clone(),
                })
                .collect(),
            subtotal: state.subtotal().display(),
            item_count: state.total_items(),
        }
    }
}

/// Build a synchronizer around the session's stored cart identifier.
async fn synchronizer(
    state: &AppState,
    session: &Session,
) -> CartSynchronizer<BigCommerceClient> {
    let cart_id = get_cart_id(session).await;
    CartSynchronizer::new(state.bigcommerce().clone(), cart_id)
}

/// Write the synchronizer's cart identifier back to the session.
async fn persist(session: &Session, sync: &CartSynchronizer<BigCommerceClient>) {
    store_cart_id(session, sync.cart_id()).await;
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i64,
    pub variant_id: Option<i64>,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub line_id: String,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub line_id: String,
}

/// Cart page query parameters.
#[derive(Debug, Deserialize)]
pub struct CartPageQuery {
    /// Set by the checkout handler when the redirect could not be created.
    pub checkout: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub checkout_retry: bool,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display the cart page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CartPageQuery>,
) -> impl IntoResponse {
    let mut sync = synchronizer(&state, &session).await;
    sync.fetch().await;
    persist(&session, &sync).await;

    CartShowTemplate {
        cart: CartView::from(sync.state()),
        checkout_retry: query.checkout.as_deref() == Some("retry"),
    }
}

/// Add an item to the cart (HTMX).
///
/// Creates a remote cart if none exists; a stale identifier falls back to a
/// fresh cart. Returns the count badge with an `HX-Trigger` so other page
/// elements refresh.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let Some(quantity) = NonZeroU32::new(form.quantity.unwrap_or(1)) else {
        return (
            axum::http::StatusCode::BAD_REQUEST,
            "Quantity must be at least 1",
        )
            .into_response();
    };

    let mut sync = synchronizer(&state, &session).await;
    sync.add_item(
        ProductId::new(form.product_id),
        form.variant_id.map(VariantId::new),
        quantity,
    )
    .await;
    persist(&session, &sync).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: sync.state().total_items(),
        },
    )
        .into_response()
}

/// Update a line item's quantity (HTMX). A zero quantity removes the line.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let line_id = LineItemId::new(form.line_id);
    let mut sync = synchronizer(&state, &session).await;
    sync.fetch().await;

    match NonZeroU32::new(form.quantity) {
        Some(quantity) => {
            sync.update_quantity(&line_id, quantity).await;
        }
        None => {
            // Zero-quantity lines are never stored; treat as removal
            sync.remove_item(&line_id).await;
        }
    }
    persist(&session, &sync).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(sync.state()),
        },
    )
        .into_response()
}

/// Remove a line item (HTMX).
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let line_id = LineItemId::new(form.line_id);
    let mut sync = synchronizer(&state, &session).await;
    sync.fetch().await;
    sync.remove_item(&line_id).await;
    persist(&session, &sync).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(sync.state()),
        },
    )
        .into_response()
}

/// Get the cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let mut sync = synchronizer(&state, &session).await;
    sync.fetch().await;
    persist(&session, &sync).await;

    CartCountTemplate {
        count: sync.state().total_items(),
    }
}

/// Redirect to the hosted BigCommerce checkout.
///
/// When no cart exists or the redirect cannot be created, the visitor lands
/// back on the cart page with a retry prompt instead of an error page.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Response {
    let sync = synchronizer(&state, &session).await;

    match sync.checkout().await {
        Some(url) => Redirect::to(url.as_str()).into_response(),
        None => Redirect::to("/cart?checkout=retry").into_response(),
    }
}
