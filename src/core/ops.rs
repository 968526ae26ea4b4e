//! Cart transitions - the add/remove toggle and the quantity update.
//!
//! These functions only decide what the next cart looks like; they never touch
//! storage. [`crate::core::session::Session`] applies the result, reconciles the
//! catalog and persists.

use crate::{
    core::{
        cart::{Cart, CartLine},
        product::{Catalog, Product, ProductId},
    },
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};

/// How the ceiling for a quantity update is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowanceRule {
    /// `original_quota` minus the quantities of every *other* line in the cart.
    /// Couples unrelated products; kept as the default for compatibility with
    /// carts built by earlier clients.
    #[default]
    CartWide,
    /// `original_quota` of the product alone.
    PerProduct,
}

impl AllowanceRule {
    /// Largest quantity `product` may be set to given the rest of `cart`.
    #[must_use]
    pub fn allowed(self, product: &Product, cart: &Cart) -> u32 {
        match self {
            Self::CartWide => product
                .original_quota
                .saturating_sub(cart.other_usage(product.id())),
            Self::PerProduct => product.original_quota,
        }
    }
}

/// Why an operation left the cart untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ignored {
    /// Add attempted while the product's remaining quota is zero
    QuotaExhausted,
    /// Requested quantity below one
    InvalidQuantity,
    /// Product is neither in the catalog nor (for removals) in the cart
    UnknownProduct,
    /// Quantity update for a product without a cart line
    NotInCart,
}

/// Outcome of a cart operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartChange {
    /// A new line with quantity 1
    Added(ProductId),
    /// A line was deleted; carries the quantity it held
    Removed {
        /// Product removed
        id: ProductId,
        /// Quantity the line held
        quantity: u32,
    },
    /// An existing line's quantity was replaced
    QuantitySet {
        /// Product updated
        id: ProductId,
        /// Quantity before the update
        from: u32,
        /// Quantity after the update
        to: u32,
    },
    /// Nothing changed
    Unchanged(Ignored),
}

impl CartChange {
    /// Whether the cart was modified.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged(_))
    }
}

/// A decided transition: the next cart plus a description, or no change.
#[derive(Debug)]
pub enum Transition {
    /// Cart must be replaced with the contained value
    Apply(Cart, CartChange),
    /// Cart stays as it is
    Keep(Ignored),
}

/// Toggles `id`'s cart membership.
///
/// A present line is removed whatever its quantity, even if the product has
/// since disappeared from the catalog. An absent product is added with quantity 1
/// only when its derived quota is at least 1.
#[must_use]
pub fn toggle(cart: &Cart, catalog: &Catalog, id: ProductId) -> Transition {
    if let Some(line) = cart.get(id) {
        let quantity = line.quantity;
        let mut next = cart.clone();
        next.remove(id);
        return Transition::Apply(next, CartChange::Removed { id, quantity });
    }

    let Some(product) = catalog.get(id) else {
        return Transition::Keep(Ignored::UnknownProduct);
    };
    if !product.is_available() {
        return Transition::Keep(Ignored::QuotaExhausted);
    }

    let mut next = cart.clone();
    next.insert(CartLine::single(product.listing.clone()));
    Transition::Apply(next, CartChange::Added(id))
}

/// Sets the quantity of an existing line.
///
/// # Errors
/// Returns [`Error::QuotaExceeded`] when `new_qty` is above what `rule` allows;
/// the cart is not modified in that case.
pub fn set_quantity(
    cart: &Cart,
    catalog: &Catalog,
    id: ProductId,
    new_qty: i64,
    rule: AllowanceRule,
) -> Result<Transition> {
    if new_qty < 1 {
        return Ok(Transition::Keep(Ignored::InvalidQuantity));
    }
    let Some(line) = cart.get(id) else {
        return Ok(Transition::Keep(Ignored::NotInCart));
    };
    let Some(product) = catalog.get(id) else {
        return Ok(Transition::Keep(Ignored::UnknownProduct));
    };

    let allowed = rule.allowed(product, cart);
    let quantity = match u32::try_from(new_qty) {
        Ok(q) if q <= allowed => q,
        _ => {
            return Err(Error::QuotaExceeded {
                product_id: id,
                requested: new_qty,
                allowed,
            });
        }
    };

    let from = line.quantity;
    let mut next = cart.clone();
    if let Some(line) = next.get_mut(id) {
        line.quantity = quantity;
    }
    Ok(Transition::Apply(
        next,
        CartChange::QuantitySet {
            id,
            from,
            to: quantity,
        },
    ))
}
