//! Conversions from BigCommerce wire types into cart domain types.

use crate::cart::{CartLineItem, CartSnapshot};
use crate::content::product_href;

use super::types::{Cart, CartItem};

/// Convert an API cart into a domain snapshot.
///
/// Physical and digital items are merged into a single list in the order the
/// API returns them.
#[must_use]
pub fn convert_cart(cart: Cart) -> CartSnapshot {
    let items = cart
        .line_items
        .physical_items
        .into_iter()
        .chain(cart.line_items.digital_items)
        .map(convert_line_item)
        .collect();

    CartSnapshot {
        id: cart.entity_id,
        currency: cart.currency_code,
        amount: cart.amount.to_money(),
        total_quantity: cart.line_items.total_quantity,
        items,
    }
}

fn convert_line_item(item: CartItem) -> CartLineItem {
    let list_price = item.list_price.to_money();
    // The API echoes the list price as salePrice when no sale applies
    let sale_price = item
        .sale_price
        .map(|m| m.to_money())
        .filter(|sale| sale.amount < list_price.amount);

    CartLineItem {
        id: item.entity_id,
        product_id: item.product_entity_id,
        variant_id: item.variant_entity_id,
        name: item.name,
        sku: item.sku,
        path: product_href(&absolute_url_to_path(&item.url)),
        image_url: item.image_url,
        quantity: item.quantity,
        list_price,
        sale_price,
    }
}

/// Strip the scheme and host from an absolute store URL, keeping the path.
/// Cart items come back with absolute URLs pointing at the BigCommerce domain;
/// links in templates must stay on this site.
#[must_use]
pub fn absolute_url_to_path(url: &str) -> String {
    let path = url::Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| url.to_string());
    if path.is_empty() {
        "/".to_string()
    } else {
        path
    }
}
