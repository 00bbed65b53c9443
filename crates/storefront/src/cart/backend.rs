//! Remote cart backend seam.

use easel_core::{CartId, LineItemId, ProductId};
use url::Url;

use crate::bigcommerce::{BigCommerceClient, BigCommerceError, CartLineInput};

use super::CartSnapshot;

/// The remote operations a cart synchronizer needs, independent of transport.
///
/// [`BigCommerceClient`] is the production implementation; tests substitute
/// an in-memory fake.
pub trait CartBackend {
    /// Fetch a cart by identifier. `Ok(None)` means the identifier is no
    /// longer valid (expired cart, converted order).
    async fn fetch_cart(
        &self,
        cart_id: &CartId,
    ) -> Result<Option<CartSnapshot>, BigCommerceError>;

    /// Create a new cart containing the given lines.
    async fn create_cart(&self, lines: &[CartLineInput]) -> Result<CartSnapshot, BigCommerceError>;

    /// Append lines to an existing cart.
    async fn add_lines(
        &self,
        cart_id: &CartId,
        lines: &[CartLineInput],
    ) -> Result<CartSnapshot, BigCommerceError>;

    /// Set the quantity of one line item. `quantity` must be positive;
    /// removal goes through [`CartBackend::remove_line`].
    async fn update_line(
        &self,
        cart_id: &CartId,
        line_item_id: &LineItemId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartSnapshot, BigCommerceError>;

    /// Remove one line item. `Ok(None)` means the removal emptied the cart
    /// and the remote record is gone.
    async fn remove_line(
        &self,
        cart_id: &CartId,
        line_item_id: &LineItemId,
    ) -> Result<Option<CartSnapshot>, BigCommerceError>;

    /// Request a hosted-checkout redirect URL for the cart.
    async fn checkout_redirect(&self, cart_id: &CartId) -> Result<Url, BigCommerceError>;
}

impl CartBackend for BigCommerceClient {
    async fn fetch_cart(
        &self,
        cart_id: &CartId,
    ) -> Result<Option<CartSnapshot>, BigCommerceError> {
        self.get_cart(cart_id).await
    }

    async fn create_cart(&self, lines: &[CartLineInput]) -> Result<CartSnapshot, BigCommerceError> {
        BigCommerceClient::create_cart(self, lines).await
    }

    async fn add_lines(
        &self,
        cart_id: &CartId,
        lines: &[CartLineInput],
    ) -> Result<CartSnapshot, BigCommerceError> {
        self.add_cart_line_items(cart_id, lines).await
    }

    async fn update_line(
        &self,
        cart_id: &CartId,
        line_item_id: &LineItemId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartSnapshot, BigCommerceError> {
        self.update_cart_line_item(cart_id, line_item_id, product_id, quantity)
            .await
    }

    async fn remove_line(
        &self,
        cart_id: &CartId,
        line_item_id: &LineItemId,
    ) -> Result<Option<CartSnapshot>, BigCommerceError> {
        self.delete_cart_line_item(cart_id, line_item_id).await
    }

    async fn checkout_redirect(&self, cart_id: &CartId) -> Result<Url, BigCommerceError> {
        self.create_checkout_redirect(cart_id).await
    }
}
