//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests product titles from the session catalog as the user types.

use crate::{bot::BotData, core::product::Catalog, errors::Error};

/// Discord autocomplete limit
const MAX_SUGGESTIONS: usize = 25;

/// Catalog titles containing `partial` (case-insensitive), in catalog order.
#[must_use]
pub fn matching_titles(catalog: &Catalog, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    catalog
        .products()
        .iter()
        .filter(|p| p.listing.title.to_lowercase().contains(&partial_lower))
        .map(|p| p.listing.title.clone())
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Provides autocomplete suggestions for product titles.
pub async fn autocomplete_product(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let session = ctx.data().session.lock().await;
    matching_titles(session.catalog(), partial)
}

/// Provides autocomplete suggestions restricted to products already in the cart.
pub async fn autocomplete_cart_product(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let session = ctx.data().session.lock().await;
    let partial_lower = partial.to_lowercase();
    session
        .cart()
        .lines()
        .map(|line| line.snapshot.title.clone())
        .filter(|title| title.to_lowercase().contains(&partial_lower))
        .take(MAX_SUGGESTIONS)
        .collect()
}
