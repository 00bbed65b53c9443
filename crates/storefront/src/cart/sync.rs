//! The cart synchronizer.
//!
//! Owns a local [`CartState`] for one request and mediates every mutation
//! through the remote backend. Mutations apply optimistically, then resolve
//! against the authoritative response via [`resolve`]. Remote failures are
//! absorbed here; callers only ever observe updated-or-unchanged state.

use std::num::NonZeroU32;

use easel_core::{CartId, LineItemId, ProductId, VariantId};
use tracing::{instrument, warn};
use url::Url;

use crate::bigcommerce::CartLineInput;

use super::CartBackend;
use super::state::{CartState, RemoteResult, resolve};

/// Synchronizes a local cart view with the remote cart it points at.
///
/// Constructed per request with the session's stored cart identifier. After
/// any mutation, [`CartSynchronizer::cart_id`] holds the identifier to write
/// back to the session (possibly `None` when the cart was emptied).
pub struct CartSynchronizer<B> {
    backend: B,
    state: CartState,
}

impl<B: CartBackend> CartSynchronizer<B> {
    /// Create a synchronizer for the given session cart identifier.
    pub fn new(backend: B, cart_id: Option<CartId>) -> Self {
        Self {
            backend,
            state: CartState {
                cart_id,
                ..CartState::empty()
            },
        }
    }

    /// Current local state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// The cart identifier to persist in the session after this request.
    pub fn cart_id(&self) -> Option<&CartId> {
        self.state.cart_id.as_ref()
    }

    /// Retrieve the current remote cart, replacing local state wholesale.
    ///
    /// No stored identifier yields an empty cart, not an error. A rejected
    /// identifier is discarded and the cart starts over empty. A transport
    /// failure keeps the identifier but renders empty; a later fetch can
    /// still recover the cart.
    #[instrument(skip(self))]
    pub async fn fetch(&mut self) -> &CartState {
        let Some(cart_id) = self.state.cart_id.clone() else {
            self.state = CartState::empty();
            return &self.state;
        };

        match self.backend.fetch_cart(&cart_id).await {
            Ok(Some(snapshot)) => {
                self.state = CartState::from_snapshot(snapshot);
            }
            Ok(None) => {
                // Expired or converted cart; start over silently
                self.state = CartState::empty();
            }
            Err(e) => {
                warn!(error = %e, "cart fetch failed, rendering empty");
                self.state = CartState {
                    cart_id: Some(cart_id),
                    ..CartState::empty()
                };
            }
        }

        &self.state
    }

    /// Add a line item, creating a remote cart if none exists.
    ///
    /// A stale stored identifier falls back to creating a brand-new cart with
    /// just this item; the new identifier replaces the stale one. If every
    /// remote attempt fails, prior state is left untouched.
    #[instrument(skip(self), fields(product_id = %product_id, quantity = %quantity))]
    pub async fn add_item(
        &mut self,
        product_id: ProductId,
        variant_id: Option<VariantId>,
        quantity: NonZeroU32,
    ) -> &CartState {
        let lines = [CartLineInput {
            product_entity_id: product_id,
            variant_entity_id: variant_id,
            quantity: quantity.get(),
        }];

        let result = match &self.state.cart_id {
            Some(cart_id) => match self.backend.add_lines(cart_id, &lines).await {
                Ok(snapshot) => Ok(snapshot),
                Err(e) => {
                    // Stale identifier or transient failure; a fresh cart
                    // keeps the user action from failing
                    warn!(error = %e, "add to existing cart failed, creating new cart");
                    self.backend.create_cart(&lines).await
                }
            },
            None => self.backend.create_cart(&lines).await,
        };

        match result {
            Ok(snapshot) => {
                self.state = CartState::from_snapshot(snapshot);
            }
            Err(e) => {
                warn!(error = %e, "add item failed, keeping prior cart state");
            }
        }

        &self.state
    }

    /// Set a line item's quantity. Quantity is non-zero by construction;
    /// removal goes through [`CartSynchronizer::remove_item`].
    ///
    /// The new quantity shows locally at once. On remote failure the
    /// authoritative state is re-fetched rather than reverted, which also
    /// recovers from identifier expiry.
    #[instrument(skip(self), fields(line_item_id = %line_item_id, quantity = %quantity))]
    pub async fn update_quantity(
        &mut self,
        line_item_id: &LineItemId,
        quantity: NonZeroU32,
    ) -> &CartState {
        let Some(cart_id) = self.state.cart_id.clone() else {
            return &self.state;
        };
        let Some(product_id) = self.state.find_item(line_item_id).map(|i| i.product_id) else {
            return &self.state;
        };

        // Optimistic apply
        for item in &mut self.state.items {
            if &item.id == line_item_id {
                item.quantity = quantity.get();
            }
        }

        match self
            .backend
            .update_line(&cart_id, line_item_id, product_id, quantity.get())
            .await
        {
            Ok(snapshot) => {
                self.state = CartState::from_snapshot(snapshot);
            }
            Err(e) => {
                warn!(error = %e, "quantity update failed, re-fetching cart");
                self.fetch().await;
            }
        }

        &self.state
    }

    /// Remove a line item.
    ///
    /// The item disappears locally at once. On remote failure the previous
    /// item list is restored without another network call. When the removal
    /// empties the cart, the remote record is gone and the identifier is
    /// cleared.
    #[instrument(skip(self), fields(line_item_id = %line_item_id))]
    pub async fn remove_item(&mut self, line_item_id: &LineItemId) -> &CartState {
        let Some(cart_id) = self.state.cart_id.clone() else {
            return &self.state;
        };
        if self.state.find_item(line_item_id).is_none() {
            return &self.state;
        }

        let prior = self.state.clone();

        // Optimistic apply
        self.state.items.retain(|item| &item.id != line_item_id);
        let tentative = self.state.clone();

        let result = match self.backend.remove_line(&cart_id, line_item_id).await {
            Ok(Some(snapshot)) if snapshot.total_quantity > 0 => RemoteResult::Cart(snapshot),
            Ok(_) => RemoteResult::Empty,
            Err(e) => {
                warn!(error = %e, "line item removal failed, restoring prior state");
                RemoteResult::Failed
            }
        };

        self.state = resolve(prior, tentative, result);
        &self.state
    }

    /// Request the hosted-checkout URL for the current cart.
    ///
    /// Returns `None` when no cart exists or the remote call fails; the
    /// caller shows a retry affordance instead of navigating.
    #[instrument(skip(self))]
    pub async fn checkout(&self) -> Option<Url> {
        let cart_id = self.state.cart_id.as_ref()?;

        match self.backend.checkout_redirect(cart_id).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(error = %e, "checkout redirect failed");
                None
            }
        }
    }
}
