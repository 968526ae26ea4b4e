//! Reply formatting for catalog and cart commands.
//!
//! Pure functions so the wording can be tested without a Discord connection.

use crate::core::{
    cart::Cart,
    ops::{CartChange, Ignored},
    product::Catalog,
};

/// Discord embeds accept at most 25 fields.
pub const MAX_EMBED_FIELDS: usize = 25;

/// Embed fields for the catalog: one per product with price and remaining quota.
#[must_use]
pub fn catalog_fields(catalog: &Catalog, cart: &Cart) -> Vec<(String, String, bool)> {
    catalog
        .products()
        .iter()
        .take(MAX_EMBED_FIELDS)
        .map(|product| {
            let status = if cart.contains(product.id()) {
                format!("🛒 In cart ({})", cart.quantity_of(product.id()))
            } else if product.is_available() {
                "Available".to_string()
            } else {
                "Sold out".to_string()
            };
            let name = format!(
                "#{} {} (${:.2})",
                product.id(),
                product.listing.title,
                product.listing.price
            );
            let value = format!(
                "Remaining quota: {}/{}\n{status}",
                product.quota, product.original_quota
            );
            (name, value, false)
        })
        .collect()
}

/// Embed fields for the cart: one per line with quantity and subtotal.
#[must_use]
pub fn cart_fields(cart: &Cart) -> Vec<(String, String, bool)> {
    cart.lines()
        .take(MAX_EMBED_FIELDS)
        .map(|line| {
            (
                format!("#{} {}", line.id(), line.snapshot.title),
                format!(
                    "Qty: {} × ${:.2} = **${:.2}**",
                    line.quantity,
                    line.snapshot.price,
                    line.subtotal()
                ),
                false,
            )
        })
        .collect()
}

/// One-line cart summary; the leading count is the distinct-product badge.
#[must_use]
pub fn cart_summary(cart: &Cart) -> String {
    format!(
        "🛒 {} product(s), {} unit(s), total ${:.2}",
        cart.badge_count(),
        cart.total_units(),
        cart.total_price()
    )
}

/// Message shown when a quantity update asks for more than allowed.
#[must_use]
pub fn quota_exceeded_message(allowed: u32) -> String {
    format!("⚠️ Only {allowed} item(s) available for this product.")
}

/// Message shown when a product reference matches nothing.
#[must_use]
pub fn not_found_message(reference: &str) -> String {
    format!("❌ Could not find a product matching '{reference}'.")
}

/// Reply to a quantity update: the change itself, plus the current ceiling
/// once a new quantity has been set.
#[must_use]
pub fn quantity_message(
    change: &CartChange,
    title: &str,
    remaining: Option<u32>,
    allowed: Option<u32>,
) -> String {
    let message = change_message(change, title, remaining);
    match (change, allowed) {
        (CartChange::QuantitySet { .. }, Some(allowed)) => {
            format!("{message}\nYou can hold up to {allowed} of this product.")
        }
        _ => message,
    }
}

/// Reply describing the outcome of a toggle or quantity update.
///
/// `remaining` is the product's reconciled quota after the operation, when the
/// product is still in the catalog.
#[must_use]
pub fn change_message(change: &CartChange, title: &str, remaining: Option<u32>) -> String {
    let remaining = remaining.map_or_else(String::new, |q| format!(" Remaining quota: {q}."));
    match change {
        CartChange::Added(_) => format!("✅ Added '{title}' to your cart.{remaining}"),
        CartChange::Removed { quantity, .. } => {
            format!("🗑 Removed '{title}' ({quantity} unit(s)) from your cart.{remaining}")
        }
        CartChange::QuantitySet { from, to, .. } => {
            format!("✅ '{title}' quantity changed from {from} to {to}.{remaining}")
        }
        CartChange::Unchanged(reason) => match reason {
            Ignored::QuotaExhausted => format!("❌ '{title}' has no quota left."),
            Ignored::InvalidQuantity => "❌ Quantity must be at least 1.".to_string(),
            Ignored::UnknownProduct => format!("❌ '{title}' is not in the catalog."),
            Ignored::NotInCart => {
                format!("❌ '{title}' is not in your cart. Use `/toggle` to add it first.")
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            cart::CartLine,
            product::ProductId,
            reconcile::reconcile,
        },
        test_utils::{listing, sample_catalog},
    };

    #[test]
    fn test_catalog_fields_show_quota_and_status() {
        let catalog = sample_catalog(&[(1, 3), (2, 1)]);
        let mut cart = Cart::new();
        cart.insert(CartLine::single(listing(2, 10.0)));
        let catalog = reconcile(&cart, &catalog);

        let fields = catalog_fields(&catalog, &cart);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].0, "#1 Product 1 ($10.00)");
        assert_eq!(fields[0].1, "Remaining quota: 3/3\nAvailable");
        assert_eq!(fields[1].1, "Remaining quota: 0/1\n🛒 In cart (1)");
    }

    #[test]
    fn test_cart_summary_counts_distinct_products() {
        let mut cart = Cart::new();
        cart.insert(CartLine {
            snapshot: listing(1, 2.5),
            quantity: 4,
        });
        cart.insert(CartLine::single(listing(2, 1.0)));

        assert_eq!(
            cart_summary(&cart),
            "🛒 2 product(s), 5 unit(s), total $11.00"
        );
        assert_eq!(cart_fields(&cart)[0].1, "Qty: 4 × $2.50 = **$10.00**");
    }

    #[test]
    fn test_quota_exceeded_message_names_allowed_amount() {
        assert_eq!(
            quota_exceeded_message(5),
            "⚠️ Only 5 item(s) available for this product."
        );
    }

    #[test]
    fn test_not_found_message_echoes_reference() {
        assert_eq!(
            not_found_message("backpak"),
            "❌ Could not find a product matching 'backpak'."
        );
    }

    #[test]
    fn test_quantity_message_states_ceiling_after_update() {
        let set = CartChange::QuantitySet {
            id: ProductId(1),
            from: 1,
            to: 3,
        };
        assert_eq!(
            quantity_message(&set, "Backpack", Some(2), Some(5)),
            "✅ 'Backpack' quantity changed from 1 to 3. Remaining quota: 2.\nYou can hold up to 5 of this product."
        );
        assert_eq!(
            quantity_message(
                &CartChange::Unchanged(Ignored::NotInCart),
                "Backpack",
                Some(5),
                Some(5)
            ),
            "❌ 'Backpack' is not in your cart. Use `/toggle` to add it first."
        );
    }

    #[test]
    fn test_change_messages() {
        assert_eq!(
            change_message(&CartChange::Added(ProductId(1)), "Backpack", Some(2)),
            "✅ Added 'Backpack' to your cart. Remaining quota: 2."
        );
        assert_eq!(
            change_message(
                &CartChange::Removed {
                    id: ProductId(1),
                    quantity: 4
                },
                "Backpack",
                None
            ),
            "🗑 Removed 'Backpack' (4 unit(s)) from your cart."
        );
        assert_eq!(
            change_message(
                &CartChange::Unchanged(Ignored::InvalidQuantity),
                "Backpack",
                Some(3)
            ),
            "❌ Quantity must be at least 1."
        );
    }
}
