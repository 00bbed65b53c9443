//! GraphQL documents for the BigCommerce Storefront API.
//!
//! Operations are written as raw documents with shared fragments and combined
//! at call time with [`with_fragments`]. Responses deserialize into the typed
//! envelopes in [`super::types`].

/// Combine an operation with the fragments it references.
#[must_use]
pub fn with_fragments(operation: &str, fragments: &[&str]) -> String {
    let mut document = String::with_capacity(
        operation.len() + fragments.iter().map(|f| f.len() + 1).sum::<usize>(),
    );
    document.push_str(operation);
    for fragment in fragments {
        document.push('\n');
        document.push_str(fragment);
    }
    document
}

// =============================================================================
// Fragments
// =============================================================================

/// Core product fields used in list views, search results, and cards.
pub const PRODUCT_FIELDS: &str = r"
fragment ProductFields on Product {
  entityId
  name
  sku
  path
  plainTextDescription(characterLimit: 200)
  defaultImage {
    url(width: 600, height: 600)
    altText
    isDefault
  }
  prices {
    price {
      value
      currencyCode
    }
    salePrice {
      value
      currencyCode
    }
    basePrice {
      value
      currencyCode
    }
    bulkPricing {
      minimumQuantity
      maximumQuantity
      discount
      type
    }
  }
  brand {
    entityId
    name
    path
  }
}
";

/// Extended product fields for the product detail page.
pub const PRODUCT_DETAIL_FIELDS: &str = r"
fragment ProductDetailFields on Product {
  entityId
  name
  sku
  path
  plainTextDescription(characterLimit: 500)
  description
  defaultImage {
    url(width: 800, height: 800)
    altText
    isDefault
  }
  images(first: 20) {
    edges {
      node {
        url(width: 800, height: 800)
        altText
        isDefault
      }
    }
  }
  prices {
    price {
      value
      currencyCode
    }
    salePrice {
      value
      currencyCode
    }
    basePrice {
      value
      currencyCode
    }
    bulkPricing {
      minimumQuantity
      maximumQuantity
      discount
      type
    }
  }
  brand {
    entityId
    name
    path
  }
  variants(first: 100) {
    edges {
      node {
        entityId
        sku
        isPurchasable
        defaultImage {
          url(width: 600, height: 600)
          altText
          isDefault
        }
        prices {
          price {
            value
            currencyCode
          }
          salePrice {
            value
            currencyCode
          }
          bulkPricing {
            minimumQuantity
            maximumQuantity
            discount
            type
          }
        }
      }
    }
  }
  relatedProducts(first: 8) {
    edges {
      node {
        ...ProductFields
      }
    }
  }
}
";

/// Cart fields shared by the cart query and every cart mutation.
pub const CART_FIELDS: &str = r"
fragment CartFields on Cart {
  entityId
  currencyCode
  amount {
    value
    currencyCode
  }
  lineItems {
    physicalItems {
      entityId
      variantEntityId
      productEntityId
      sku
      name
      url
      imageUrl
      quantity
      listPrice {
        value
        currencyCode
      }
      salePrice {
        value
        currencyCode
      }
    }
    digitalItems {
      entityId
      variantEntityId
      productEntityId
      sku
      name
      url
      imageUrl
      quantity
      listPrice {
        value
        currencyCode
      }
      salePrice {
        value
        currencyCode
      }
    }
    totalQuantity
  }
}
";

// =============================================================================
// Catalog queries
// =============================================================================

/// Paginated product list. Goes through catalog search with no filters so
/// the listing supports the same sort orders as search.
pub const GET_PRODUCTS: &str = r"
query GetProducts($first: Int = 12, $after: String, $sort: SearchProductsSortInput) {
  site {
    search {
      searchProducts(filters: {}, sort: $sort) {
        products(first: $first, after: $after) {
          pageInfo {
            hasNextPage
            hasPreviousPage
            startCursor
            endCursor
          }
          edges {
            node {
              ...ProductFields
            }
          }
        }
      }
    }
  }
}
";

/// Single product by its URL path (dynamic product detail routes).
pub const GET_PRODUCT_BY_PATH: &str = r"
query GetProductByPath($path: String!) {
  site {
    route(path: $path) {
      node {
        ... on Product {
          ...ProductDetailFields
        }
      }
    }
  }
}
";

/// Featured products for the home page.
pub const GET_FEATURED_PRODUCTS: &str = r"
query GetFeaturedProducts($first: Int = 8) {
  site {
    featuredProducts(first: $first) {
      pageInfo {
        hasNextPage
        hasPreviousPage
        startCursor
        endCursor
      }
      edges {
        node {
          ...ProductFields
        }
      }
    }
  }
}
";

/// Full-text product search.
pub const SEARCH_PRODUCTS: &str = r"
query SearchProducts($searchTerm: String!, $first: Int = 12, $after: String, $sort: SearchProductsSortInput) {
  site {
    search {
      searchProducts(filters: { searchTerm: $searchTerm }, sort: $sort) {
        products(first: $first, after: $after) {
          pageInfo {
            hasNextPage
            hasPreviousPage
            startCursor
            endCursor
          }
          edges {
            node {
              ...ProductFields
            }
          }
        }
      }
    }
  }
}
";

/// Top-level category tree for navigation and the collections index.
pub const GET_CATEGORY_TREE: &str = r"
query GetCategoryTree {
  site {
    categoryTree {
      entityId
      name
      path
      description
      image {
        url(width: 800)
        altText
      }
      children {
        entityId
        name
        path
        description
        image {
          url(width: 800)
          altText
        }
        children {
          entityId
          name
          path
        }
      }
    }
  }
}
";

/// Category by URL path, with its products.
pub const GET_CATEGORY_BY_PATH: &str = r"
query GetCategoryByPath($path: String!, $first: Int = 12, $after: String, $sort: CategoryProductSort) {
  site {
    route(path: $path) {
      node {
        ... on Category {
          entityId
          name
          path
          description
          products(first: $first, after: $after, sortBy: $sort) {
            pageInfo {
              hasNextPage
              hasPreviousPage
              startCursor
              endCursor
            }
            edges {
              node {
                ...ProductFields
              }
            }
          }
        }
      }
    }
  }
}
";

// =============================================================================
// Cart operations
// =============================================================================

/// Existing cart by its entity ID.
pub const GET_CART: &str = r"
query GetCart($entityId: String!) {
  site {
    cart(entityId: $entityId) {
      ...CartFields
    }
  }
}
";

/// Create a new cart with one or more line items.
pub const CREATE_CART: &str = r"
mutation CreateCart($lineItems: [CartLineItemInput!]!) {
  cart {
    createCart(input: { lineItems: $lineItems }) {
      cart {
        ...CartFields
      }
    }
  }
}
";

/// Add line items to an existing cart.
pub const ADD_CART_LINE_ITEMS: &str = r"
mutation AddCartLineItems($cartEntityId: String!, $lineItems: [CartLineItemInput!]!) {
  cart {
    addCartLineItems(
      input: { cartEntityId: $cartEntityId, data: { lineItems: $lineItems } }
    ) {
      cart {
        ...CartFields
      }
    }
  }
}
";

/// Update a single line item's quantity in an existing cart.
pub const UPDATE_CART_LINE_ITEM: &str = r"
mutation UpdateCartLineItem(
  $cartEntityId: String!
  $lineItemEntityId: String!
  $quantity: Int!
  $productEntityId: Int!
) {
  cart {
    updateCartLineItem(
      input: {
        cartEntityId: $cartEntityId
        lineItemEntityId: $lineItemEntityId
        data: {
          lineItem: { productEntityId: $productEntityId, quantity: $quantity }
        }
      }
    ) {
      cart {
        ...CartFields
      }
    }
  }
}
";

/// Remove a line item from an existing cart.
pub const DELETE_CART_LINE_ITEM: &str = r"
mutation DeleteCartLineItem($cartEntityId: String!, $lineItemEntityId: String!) {
  cart {
    deleteCartLineItem(
      input: { cartEntityId: $cartEntityId, lineItemEntityId: $lineItemEntityId }
    ) {
      cart {
        ...CartFields
      }
    }
  }
}
";

/// Redirect URLs for the hosted checkout.
pub const CREATE_CHECKOUT_REDIRECT: &str = r"
mutation CreateCartRedirectUrls($cartEntityId: String!) {
  cart {
    createCartRedirectUrls(input: { cartEntityId: $cartEntityId }) {
      redirectUrls {
        redirectedCheckoutUrl
        embeddedCheckoutUrl
      }
    }
  }
}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_fragments_appends_in_order() {
        let document = with_fragments("query Q { x }", &["fragment A on T { y }"]);
        assert!(document.starts_with("query Q { x }"));
        assert!(document.ends_with("fragment A on T { y }"));
    }

    #[test]
    fn operations_reference_declared_fragments() {
        // Every operation that spreads ProductFields must be combined with it
        for operation in [
            GET_PRODUCTS,
            GET_FEATURED_PRODUCTS,
            SEARCH_PRODUCTS,
            GET_CATEGORY_BY_PATH,
        ] {
            assert!(operation.contains("...ProductFields"));
        }

        let detail = with_fragments(
            GET_PRODUCT_BY_PATH,
            &[PRODUCT_DETAIL_FIELDS, PRODUCT_FIELDS],
        );
        assert!(detail.contains("fragment ProductDetailFields on Product"));
        assert!(detail.contains("fragment ProductFields on Product"));

        for operation in [
            GET_CART,
            CREATE_CART,
            ADD_CART_LINE_ITEMS,
            UPDATE_CART_LINE_ITEM,
            DELETE_CART_LINE_ITEM,
        ] {
            assert!(operation.contains("...CartFields"));
        }
    }

    #[test]
    fn product_listings_declare_a_sort_variable() {
        for operation in [GET_PRODUCTS, SEARCH_PRODUCTS, GET_CATEGORY_BY_PATH] {
            assert!(operation.contains("$sort"));
        }
    }
}
