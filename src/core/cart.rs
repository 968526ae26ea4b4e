//! Cart model - one line per product, keyed by product id.
//!
//! The stored form is a JSON object mapping each product id to
//! `{id, title, price, image, quantity}`. Extra fields in stored lines are ignored
//! when loading so carts written by older clients still load.

use crate::{
    core::product::{ProductId, ProductListing},
    errors::Result,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// A product's presence in the cart: its display snapshot plus a quantity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product attributes as they were when the line was created
    #[serde(flatten)]
    pub snapshot: ProductListing,
    /// Units held, always at least 1
    pub quantity: u32,
}

impl CartLine {
    /// Creates a line holding a single unit of `listing`.
    #[must_use]
    pub const fn single(snapshot: ProductListing) -> Self {
        Self {
            snapshot,
            quantity: 1,
        }
    }

    /// Product identifier.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.snapshot.id
    }

    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.snapshot.price * f64::from(self.quantity)
    }
}

/// Mapping from product id to at most one cart line.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: BTreeMap<ProductId, CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a stored cart.
    ///
    /// Every line is keyed by its own `id`, whatever key it was stored under.
    /// When two stored entries describe the same product, the one under the
    /// matching key wins; otherwise the first one read is kept.
    ///
    /// # Errors
    /// Returns a serialization error if `text` is not a valid stored cart.
    pub fn from_json(text: &str) -> Result<Self> {
        let stored: BTreeMap<ProductId, CartLine> = serde_json::from_str(text)?;

        let (matching, mismatched): (Vec<_>, Vec<_>) = stored
            .into_iter()
            // Zero-quantity lines mean "absent"
            .filter(|(_, line)| line.quantity >= 1)
            .partition(|(key, line)| *key == line.id());

        let mut cart = Self::new();
        for (_, line) in matching {
            cart.insert(line);
        }
        for (key, line) in mismatched {
            if cart.contains(line.id()) {
                warn!(
                    "Dropping stored cart entry {} for product {}, which already has a line.",
                    key,
                    line.id()
                );
                continue;
            }
            warn!(
                "Stored cart entry {} holds product {}, re-keying.",
                key,
                line.id()
            );
            cart.insert(line);
        }
        Ok(cart)
    }

    /// Serializes the cart into its stored form.
    ///
    /// # Errors
    /// Returns a serialization error if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Into::into)
    }

    /// Whether `id` has a line.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.lines.contains_key(&id)
    }

    /// Line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.get(&id)
    }

    /// Quantity held for `id`, 0 when absent.
    #[must_use]
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.lines.get(&id).map_or(0, |line| line.quantity)
    }

    /// Sum of quantities over every line except `id`.
    #[must_use]
    pub fn other_usage(&self, id: ProductId) -> u32 {
        self.lines
            .values()
            .filter(|line| line.id() != id)
            .map(|line| line.quantity)
            .sum()
    }

    /// Number of distinct products in the cart, shown as the cart badge.
    #[must_use]
    pub fn badge_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn total_units(&self) -> u32 {
        self.lines.values().map(|line| line.quantity).sum()
    }

    /// Total price across all lines.
    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.lines.values().map(CartLine::subtotal).sum()
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines ordered by product id.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    pub(crate) fn insert(&mut self, line: CartLine) {
        self.lines.insert(line.id(), line);
    }

    pub(crate) fn remove(&mut self, id: ProductId) -> Option<CartLine> {
        self.lines.remove(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.get_mut(&id)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{listing, sample_listings};

    fn cart_with(quantities: &[(u64, u32)]) -> Cart {
        let mut cart = Cart::new();
        for &(id, quantity) in quantities {
            cart.insert(CartLine {
                snapshot: listing(id, 10.0),
                quantity,
            });
        }
        cart
    }

    #[test]
    fn test_quantity_of_absent_product_is_zero() {
        let cart = cart_with(&[(1, 2)]);
        assert_eq!(cart.quantity_of(ProductId(1)), 2);
        assert_eq!(cart.quantity_of(ProductId(2)), 0);
    }

    #[test]
    fn test_other_usage_excludes_the_product_itself() {
        let cart = cart_with(&[(1, 2), (2, 3), (3, 1)]);
        assert_eq!(cart.other_usage(ProductId(2)), 3);
        assert_eq!(cart.other_usage(ProductId(9)), 6);
    }

    #[test]
    fn test_badge_counts_distinct_products_not_units() {
        let cart = cart_with(&[(1, 4), (2, 1)]);
        assert_eq!(cart.badge_count(), 2);
        assert_eq!(cart.total_units(), 5);
        assert_eq!(cart.total_price(), 50.0);
    }

    #[test]
    fn test_stored_form_is_object_keyed_by_id() {
        let mut cart = Cart::new();
        cart.insert(CartLine::single(sample_listings().remove(0)));

        let value: serde_json::Value = serde_json::from_str(&cart.to_json().unwrap()).unwrap();
        let line = &value["1"];
        assert_eq!(line["id"], 1);
        assert_eq!(line["title"], "Fjallraven Backpack");
        assert_eq!(line["quantity"], 1);
        assert!(line.get("price").is_some());
        assert!(line.get("image").is_some());
    }

    #[test]
    fn test_from_json_reads_legacy_lines_with_extra_fields() {
        let stored = r#"{
            "4": {
                "id": 4,
                "title": "Mens Casual Slim Fit",
                "price": 15.99,
                "image": "https://example.test/4.jpg",
                "originalQuota": 3,
                "quota": 3,
                "category": "men's clothing",
                "quantity": 2
            }
        }"#;
        let cart = Cart::from_json(stored).unwrap();
        assert_eq!(cart.quantity_of(ProductId(4)), 2);
        assert_eq!(cart.get(ProductId(4)).unwrap().snapshot.price, 15.99);
    }

    #[test]
    fn test_from_json_drops_zero_quantity_lines() {
        let stored = r#"{"1":{"id":1,"title":"t","price":1.0,"image":"i","quantity":0}}"#;
        let cart = Cart::from_json(stored).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_from_json_keys_lines_by_their_own_id() {
        let stored = r#"{"5":{"id":7,"title":"t","price":1.0,"image":"i","quantity":2}}"#;
        let cart = Cart::from_json(stored).unwrap();

        assert_eq!(cart.quantity_of(ProductId(7)), 2);
        assert_eq!(cart.quantity_of(ProductId(5)), 0);
        assert!(cart.lines().all(|line| line.id() == ProductId(7)));
        assert_eq!(cart.badge_count(), 1);
    }

    #[test]
    fn test_from_json_keeps_one_line_per_product() {
        let stored = r#"{
            "5": {"id": 7, "title": "t", "price": 1.0, "image": "i", "quantity": 3},
            "7": {"id": 7, "title": "t", "price": 1.0, "image": "i", "quantity": 1}
        }"#;
        let cart = Cart::from_json(stored).unwrap();

        assert_eq!(cart.badge_count(), 1);
        assert_eq!(cart.quantity_of(ProductId(7)), 1);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Cart::from_json("not json").is_err());
    }
}
