//! Quota reconciliation - derives each product's remaining quota from the cart.

use crate::core::{cart::Cart, product::Catalog};

/// Returns a copy of `catalog` where every product's `quota` equals its
/// `original_quota` minus the quantity held in `cart` (0 if absent).
///
/// A product's remaining quota depends only on its own line. The subtraction
/// saturates at zero, so `0 <= quota <= original_quota` holds for any input.
#[must_use]
pub fn reconcile(cart: &Cart, catalog: &Catalog) -> Catalog {
    let mut reconciled = catalog.clone();
    reconcile_in_place(cart, &mut reconciled);
    reconciled
}

/// In-place form of [`reconcile`], used by the session after each mutation.
pub fn reconcile_in_place(cart: &Cart, catalog: &mut Catalog) {
    for product in catalog.products_mut() {
        let held = cart.quantity_of(product.id());
        product.quota = product.original_quota.saturating_sub(held);
    }
}
