//! Cart synchronizer behavior against an in-memory backend.
//!
//! The fake backend simulates the remote cart service: carts live in a map,
//! unknown identifiers are rejected, and individual operations can be made
//! to fail to exercise the recovery paths.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicU32, Ordering},
};

use easel_core::{CartId, CurrencyCode, LineItemId, Money, ProductId};
use rust_decimal::Decimal;
use url::Url;

use easel_storefront::bigcommerce::{BigCommerceError, CartLineInput, GraphQLError};
use easel_storefront::cart::{CartBackend, CartLineItem, CartSnapshot, CartSynchronizer};

// =============================================================================
// Fake backend
// =============================================================================

#[derive(Clone, Copy)]
struct CatalogEntry {
    list_cents: i64,
    sale_cents: Option<i64>,
}

#[derive(Default)]
struct FakeInner {
    catalog: HashMap<i64, CatalogEntry>,
    carts: HashMap<String, Vec<CartLineItem>>,
    next_cart: u32,
    next_line: u32,
    fail_adds: bool,
    fail_creates: bool,
    fail_updates: bool,
    fail_removes: bool,
    fail_checkout: bool,
}

#[derive(Clone, Default)]
struct FakeBackend {
    inner: Arc<Mutex<FakeInner>>,
    fetch_calls: Arc<AtomicU32>,
    checkout_calls: Arc<AtomicU32>,
}

fn remote_error(message: &str) -> BigCommerceError {
    BigCommerceError::GraphQL(vec![GraphQLError {
        message: message.to_string(),
        locations: vec![],
        path: vec![],
    }])
}

fn usd(cents: i64) -> Money {
    Money::new(Decimal::new(cents, 2), CurrencyCode::USD)
}

impl FakeBackend {
    fn with_catalog(entries: &[(i64, i64, Option<i64>)]) -> Self {
        let backend = Self::default();
        {
            let mut inner = backend.inner.lock().unwrap();
            for &(product, list_cents, sale_cents) in entries {
                inner.catalog.insert(
                    product,
                    CatalogEntry {
                        list_cents,
                        sale_cents,
                    },
                );
            }
        }
        backend
    }

    fn set_fail_adds(&self, fail: bool) {
        self.inner.lock().unwrap().fail_adds = fail;
    }

    fn set_fail_creates(&self, fail: bool) {
        self.inner.lock().unwrap().fail_creates = fail;
    }

    fn set_fail_updates(&self, fail: bool) {
        self.inner.lock().unwrap().fail_updates = fail;
    }

    fn set_fail_removes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_removes = fail;
    }

    fn set_fail_checkout(&self, fail: bool) {
        self.inner.lock().unwrap().fail_checkout = fail;
    }

    fn fetch_count(&self) -> u32 {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn checkout_count(&self) -> u32 {
        self.checkout_calls.load(Ordering::SeqCst)
    }
}

impl FakeInner {
    fn make_line(&mut self, input: &CartLineInput) -> CartLineItem {
        let product = input.product_entity_id.as_i64();
        let entry = self.catalog.get(&product).copied().unwrap_or(CatalogEntry {
            list_cents: 1000,
            sale_cents: None,
        });
        self.next_line += 1;
        CartLineItem {
            id: LineItemId::new(format!("line-{}", self.next_line)),
            product_id: input.product_entity_id,
            variant_id: input.variant_entity_id,
            name: format!("Product {product}"),
            sku: format!("SKU-{product}"),
            path: format!("/product-{product}/"),
            image_url: None,
            quantity: input.quantity,
            list_price: usd(entry.list_cents),
            sale_price: entry.sale_cents.map(usd),
        }
    }

    fn snapshot(&self, cart_id: &str) -> Option<CartSnapshot> {
        let items = self.carts.get(cart_id)?.clone();
        let total_quantity = items.iter().map(|i| i.quantity).sum();
        let amount = items
            .iter()
            .map(|i| i.line_total().amount)
            .sum::<Decimal>();
        Some(CartSnapshot {
            id: CartId::new(cart_id),
            currency: CurrencyCode::USD,
            amount: Money::new(amount, CurrencyCode::USD),
            total_quantity,
            items,
        })
    }
}

impl CartBackend for FakeBackend {
    async fn fetch_cart(
        &self,
        cart_id: &CartId,
    ) -> Result<Option<CartSnapshot>, BigCommerceError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let inner = self.inner.lock().unwrap();
        Ok(inner.snapshot(cart_id.as_str()))
    }

    async fn create_cart(&self, lines: &[CartLineInput]) -> Result<CartSnapshot, BigCommerceError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_creates {
            return Err(remote_error("create failed"));
        }
        inner.next_cart += 1;
        let cart_id = format!("cart-{}", inner.next_cart);
        let items: Vec<CartLineItem> = lines.iter().map(|l| inner.make_line(l)).collect();
        inner.carts.insert(cart_id.clone(), items);
        Ok(inner.snapshot(&cart_id).expect("cart just created"))
    }

    async fn add_lines(
        &self,
        cart_id: &CartId,
        lines: &[CartLineInput],
    ) -> Result<CartSnapshot, BigCommerceError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_adds {
            return Err(remote_error("add failed"));
        }
        if !inner.carts.contains_key(cart_id.as_str()) {
            return Err(remote_error("cart not found"));
        }
        let new_items: Vec<CartLineItem> = lines.iter().map(|l| inner.make_line(l)).collect();
        inner
            .carts
            .get_mut(cart_id.as_str())
            .expect("checked above")
            .extend(new_items);
        Ok(inner.snapshot(cart_id.as_str()).expect("checked above"))
    }

    async fn update_line(
        &self,
        cart_id: &CartId,
        line_item_id: &LineItemId,
        _product_id: ProductId,
        quantity: u32,
    ) -> Result<CartSnapshot, BigCommerceError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_updates {
            return Err(remote_error("update failed"));
        }
        let items = inner
            .carts
            .get_mut(cart_id.as_str())
            .ok_or_else(|| remote_error("cart not found"))?;
        let item = items
            .iter_mut()
            .find(|i| &i.id == line_item_id)
            .ok_or_else(|| remote_error("line item not found"))?;
        item.quantity = quantity;
        Ok(inner.snapshot(cart_id.as_str()).expect("cart exists"))
    }

    async fn remove_line(
        &self,
        cart_id: &CartId,
        line_item_id: &LineItemId,
    ) -> Result<Option<CartSnapshot>, BigCommerceError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_removes {
            return Err(remote_error("remove failed"));
        }
        let items = inner
            .carts
            .get_mut(cart_id.as_str())
            .ok_or_else(|| remote_error("cart not found"))?;
        items.retain(|i| &i.id != line_item_id);
        if items.is_empty() {
            // The platform deletes empty carts
            inner.carts.remove(cart_id.as_str());
            return Ok(None);
        }
        Ok(inner.snapshot(cart_id.as_str()))
    }

    async fn checkout_redirect(&self, cart_id: &CartId) -> Result<Url, BigCommerceError> {
        self.checkout_calls.fetch_add(1, Ordering::SeqCst);
        let inner = self.inner.lock().unwrap();
        if inner.fail_checkout {
            return Err(remote_error("checkout unavailable"));
        }
        if !inner.carts.contains_key(cart_id.as_str()) {
            return Err(remote_error("cart not found"));
        }
        let url = format!("https://checkout.example.com/{}", cart_id.as_str());
        Url::parse(&url).map_err(|_| remote_error("bad url"))
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn qty(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).expect("test quantities are positive")
}

async fn synchronizer_with_item(
    backend: &FakeBackend,
    product: i64,
    quantity: u32,
) -> CartSynchronizer<FakeBackend> {
    let mut sync = CartSynchronizer::new(backend.clone(), None);
    sync.add_item(ProductId::new(product), None, qty(quantity))
        .await;
    sync
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn updated_quantity_is_authoritative_after_fetch() {
    let backend = FakeBackend::with_catalog(&[(1, 1000, None)]);
    let mut sync = synchronizer_with_item(&backend, 1, 1).await;
    let line_id = sync.state().items[0].id.clone();

    for q in [2_u32, 7, 99] {
        sync.update_quantity(&line_id, qty(q)).await;
        sync.fetch().await;
        assert_eq!(sync.state().find_item(&line_id).unwrap().quantity, q);
    }
}

#[tokio::test]
async fn subtotal_and_total_items_for_mixed_sale_cart() {
    // Item A: $10 list, no sale, qty 2. Item B: $20 list, $15 sale, qty 1.
    let backend = FakeBackend::with_catalog(&[(1, 1000, None), (2, 2000, Some(1500))]);
    let mut sync = synchronizer_with_item(&backend, 1, 2).await;
    sync.add_item(ProductId::new(2), None, qty(1)).await;

    assert_eq!(sync.state().subtotal(), usd(3500));
    assert_eq!(sync.state().total_items(), 3);
}

#[tokio::test]
async fn total_items_sums_quantities_across_lines() {
    let backend = FakeBackend::with_catalog(&[(1, 1000, None), (2, 2000, None)]);
    let mut sync = synchronizer_with_item(&backend, 1, 2).await;
    sync.add_item(ProductId::new(2), None, qty(3)).await;

    assert_eq!(sync.state().items.len(), 2);
    assert_eq!(sync.state().total_items(), 5);
}

#[tokio::test]
async fn removing_last_item_clears_cart_identifier() {
    let backend = FakeBackend::with_catalog(&[(1, 1000, None)]);
    let mut sync = synchronizer_with_item(&backend, 1, 2).await;
    assert!(sync.cart_id().is_some());

    let line_id = sync.state().items[0].id.clone();
    sync.remove_item(&line_id).await;

    assert!(sync.cart_id().is_none());
    assert!(sync.state().is_empty());

    // The next fetch has no identifier to send, so no request goes out
    let fetches_before = backend.fetch_count();
    sync.fetch().await;
    assert_eq!(backend.fetch_count(), fetches_before);
    assert!(sync.state().is_empty());
}

#[tokio::test]
async fn checkout_without_cart_returns_none_without_a_request() {
    let backend = FakeBackend::default();
    let sync = CartSynchronizer::new(backend.clone(), None);

    assert!(sync.checkout().await.is_none());
    assert_eq!(backend.checkout_count(), 0);
}

#[tokio::test]
async fn checkout_returns_redirect_for_existing_cart() {
    let backend = FakeBackend::with_catalog(&[(1, 1000, None)]);
    let sync = synchronizer_with_item(&backend, 1, 1).await;

    let url = sync.checkout().await.expect("cart exists");
    assert!(url.as_str().starts_with("https://checkout.example.com/"));
}

#[tokio::test]
async fn checkout_failure_surfaces_as_none() {
    let backend = FakeBackend::with_catalog(&[(1, 1000, None)]);
    let sync = synchronizer_with_item(&backend, 1, 1).await;

    backend.set_fail_checkout(true);
    assert!(sync.checkout().await.is_none());
    assert!(backend.checkout_count() > 0);
}

#[tokio::test]
async fn add_with_stale_identifier_creates_replacement_cart() {
    let backend = FakeBackend::with_catalog(&[(1, 1000, None)]);
    let stale = CartId::new("cart-gone");
    let mut sync = CartSynchronizer::new(backend.clone(), Some(stale.clone()));

    sync.add_item(ProductId::new(1), None, qty(1)).await;

    let new_id = sync.cart_id().expect("new cart created");
    assert_ne!(new_id, &stale);
    assert_eq!(sync.state().items.len(), 1);
    assert_eq!(sync.state().items[0].product_id, ProductId::new(1));
}

#[tokio::test]
async fn fetch_is_idempotent_without_mutations() {
    let backend = FakeBackend::with_catalog(&[(1, 1000, None), (2, 2000, Some(1500))]);
    let mut sync = synchronizer_with_item(&backend, 1, 2).await;
    sync.add_item(ProductId::new(2), None, qty(1)).await;

    sync.fetch().await;
    let first = sync.state().clone();
    sync.fetch().await;
    assert_eq!(sync.state(), &first);
}

#[tokio::test]
async fn add_failure_falls_back_to_a_fresh_cart() {
    let backend = FakeBackend::with_catalog(&[(1, 1000, None), (2, 2000, None)]);
    let mut sync = synchronizer_with_item(&backend, 1, 2).await;
    let old_id = sync.cart_id().cloned();

    backend.set_fail_adds(true);
    sync.add_item(ProductId::new(2), None, qty(1)).await;

    let after = sync.state();
    assert!(after.cart_id.is_some());
    assert_ne!(after.cart_id, old_id);
    assert_eq!(after.items.len(), 1);
    assert_eq!(after.items[0].product_id, ProductId::new(2));
}

#[tokio::test]
async fn total_add_failure_leaves_prior_state_unchanged() {
    let backend = FakeBackend::with_catalog(&[(1, 1000, None), (2, 2000, None)]);
    let mut sync = synchronizer_with_item(&backend, 1, 2).await;
    let before = sync.state().clone();

    backend.set_fail_adds(true);
    backend.set_fail_creates(true);
    sync.add_item(ProductId::new(2), None, qty(1)).await;

    assert_eq!(sync.state(), &before);
}

#[tokio::test]
async fn remove_failure_restores_previous_items() {
    let backend = FakeBackend::with_catalog(&[(1, 1000, None), (2, 2000, None)]);
    let mut sync = synchronizer_with_item(&backend, 1, 2).await;
    sync.add_item(ProductId::new(2), None, qty(1)).await;
    let before = sync.state().clone();
    let line_id = before.items[0].id.clone();

    backend.set_fail_removes(true);
    sync.remove_item(&line_id).await;

    assert_eq!(sync.state(), &before);
}

#[tokio::test]
async fn update_failure_recovers_authoritative_state() {
    let backend = FakeBackend::with_catalog(&[(1, 1000, None)]);
    let mut sync = synchronizer_with_item(&backend, 1, 2).await;
    let line_id = sync.state().items[0].id.clone();

    backend.set_fail_updates(true);
    sync.update_quantity(&line_id, qty(9)).await;

    // The optimistic 9 must not survive; the re-fetch restores the remote 2
    assert_eq!(sync.state().find_item(&line_id).unwrap().quantity, 2);
}
