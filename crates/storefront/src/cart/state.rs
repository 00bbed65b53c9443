//! Local cart state and the optimistic-update resolution rules.

use easel_core::{CartId, CurrencyCode, LineItemId, Money, ProductId, VariantId};
use rust_decimal::Decimal;
use serde::Serialize;

/// A denormalized snapshot of one cart entry, kept for local rendering.
///
/// Display fields are copied from the remote response and not independently
/// validated. The line-item id is stable across quantity updates but replaced
/// when an item is removed and re-added.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLineItem {
    pub id: LineItemId,
    pub product_id: ProductId,
    pub variant_id: Option<VariantId>,
    pub name: String,
    pub sku: String,
    /// Navigable path on this site, e.g. `/products/french-field-easel`.
    pub path: String,
    pub image_url: Option<String>,
    /// Always positive. Zero signals removal and is never stored.
    pub quantity: u32,
    pub list_price: Money,
    pub sale_price: Option<Money>,
}

impl CartLineItem {
    /// Unit price used for totals: the sale price when present, else list.
    #[must_use]
    pub fn unit_price(&self) -> &Money {
        self.sale_price.as_ref().unwrap_or(&self.list_price)
    }

    /// Extended price for this line.
    #[must_use]
    pub fn line_total(&self) -> Money {
        let unit = self.unit_price();
        Money::new(unit.amount * Decimal::from(self.quantity), unit.currency)
    }
}

/// An authoritative cart as returned by the remote backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSnapshot {
    pub id: CartId,
    pub currency: CurrencyCode,
    /// Cart total as computed remotely, including any cart-level discounts.
    pub amount: Money,
    pub total_quantity: u32,
    pub items: Vec<CartLineItem>,
}

/// The locally held cart: a best-effort cache of the remote cart, replaced
/// wholesale on every successful remote read.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CartState {
    /// Pointer to the remote cart, if one exists for this session.
    pub cart_id: Option<CartId>,
    pub currency: CurrencyCode,
    pub items: Vec<CartLineItem>,
}

impl CartState {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_snapshot(snapshot: CartSnapshot) -> Self {
        Self {
            cart_id: Some(snapshot.id),
            currency: snapshot.currency,
            items: snapshot.items,
        }
    }

    /// Sum of quantities across all line items. Recomputed on every read.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of `(sale price if present else list price) × quantity` over all
    /// line items. Recomputed on every read; no cross-currency conversion.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        let total = self
            .items
            .iter()
            .map(|item| item.line_total().amount)
            .sum::<Decimal>();
        Money::new(total, self.currency)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn find_item(&self, id: &LineItemId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| &item.id == id)
    }
}

/// Outcome of the remote call that follows an optimistic local mutation.
#[derive(Debug, Clone)]
pub enum RemoteResult {
    /// The backend returned an authoritative cart.
    Cart(CartSnapshot),
    /// The backend reports no cart: the last line item was removed, or the
    /// stored identifier has expired.
    Empty,
    /// The call failed before producing an authoritative answer.
    Failed,
}

/// Resolve an optimistic mutation against its remote outcome.
///
/// - An authoritative cart replaces both local states wholesale.
/// - An empty outcome discards the cart identifier along with the items.
/// - A failure restores the state captured before the tentative change.
#[must_use]
pub fn resolve(prior: CartState, tentative: CartState, result: RemoteResult) -> CartState {
    match result {
        RemoteResult::Cart(snapshot) => CartState::from_snapshot(snapshot),
        RemoteResult::Empty => CartState {
            cart_id: None,
            currency: tentative.currency,
            items: Vec::new(),
        },
        RemoteResult::Failed => prior,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn line_item(
        id: &str,
        product: i64,
        list_cents: i64,
        sale_cents: Option<i64>,
        quantity: u32,
    ) -> CartLineItem {
        CartLineItem {
            id: LineItemId::new(id),
            product_id: ProductId::new(product),
            variant_id: None,
            name: format!("Product {product}"),
            sku: format!("SKU-{product}"),
            path: format!("/product-{product}/"),
            image_url: None,
            quantity,
            list_price: Money::new(Decimal::new(list_cents, 2), CurrencyCode::USD),
            sale_price: sale_cents
                .map(|cents| Money::new(Decimal::new(cents, 2), CurrencyCode::USD)),
        }
    }

    pub(crate) fn snapshot(cart_id: &str, items: Vec<CartLineItem>) -> CartSnapshot {
        let total_quantity = items.iter().map(|i| i.quantity).sum();
        let amount = items
            .iter()
            .map(|i| i.line_total().amount)
            .sum::<Decimal>();
        CartSnapshot {
            id: CartId::new(cart_id),
            currency: CurrencyCode::USD,
            amount: Money::new(amount, CurrencyCode::USD),
            total_quantity,
            items,
        }
    }

    #[test]
    fn subtotal_prefers_sale_price() {
        // Item A: $10 list, no sale, qty 2. Item B: $20 list, $15 sale, qty 1.
        let state = CartState {
            cart_id: Some(CartId::new("cart-1")),
            currency: CurrencyCode::USD,
            items: vec![
                line_item("a", 1, 1000, None, 2),
                line_item("b", 2, 2000, Some(1500), 1),
            ],
        };

        assert_eq!(state.subtotal().amount, Decimal::new(3500, 2));
        assert_eq!(state.total_items(), 3);
    }

    #[test]
    fn total_items_sums_quantities_not_lines() {
        let state = CartState {
            cart_id: None,
            currency: CurrencyCode::USD,
            items: vec![
                line_item("a", 1, 1000, None, 2),
                line_item("b", 2, 2000, None, 3),
            ],
        };
        assert_eq!(state.total_items(), 5);
    }

    #[test]
    fn empty_state_has_zero_totals() {
        let state = CartState::empty();
        assert!(state.is_empty());
        assert_eq!(state.total_items(), 0);
        assert_eq!(state.subtotal().amount, Decimal::ZERO);
    }

    #[test]
    fn resolve_cart_replaces_wholesale() {
        let prior = CartState::empty();
        let tentative = CartState::empty();
        let snap = snapshot("cart-9", vec![line_item("a", 1, 1000, None, 4)]);

        let resolved = resolve(prior, tentative, RemoteResult::Cart(snap));
        assert_eq!(resolved.cart_id, Some(CartId::new("cart-9")));
        assert_eq!(resolved.total_items(), 4);
    }

    #[test]
    fn resolve_empty_clears_identifier() {
        let prior = CartState::from_snapshot(snapshot(
            "cart-1",
            vec![line_item("a", 1, 1000, None, 1)],
        ));
        let tentative = CartState {
            items: Vec::new(),
            ..prior.clone()
        };

        let resolved = resolve(prior, tentative, RemoteResult::Empty);
        assert!(resolved.cart_id.is_none());
        assert!(resolved.is_empty());
    }

    #[test]
    fn resolve_failure_restores_prior() {
        let prior = CartState::from_snapshot(snapshot(
            "cart-1",
            vec![
                line_item("a", 1, 1000, None, 2),
                line_item("b", 2, 2000, None, 1),
            ],
        ));
        let tentative = CartState {
            items: vec![prior.items[1].clone()],
            ..prior.clone()
        };

        let resolved = resolve(prior.clone(), tentative, RemoteResult::Failed);
        assert_eq!(resolved, prior);
    }
}
