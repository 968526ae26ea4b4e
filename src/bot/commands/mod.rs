//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Cart commands
pub mod cart;

/// Catalog browsing commands
pub mod catalog;

/// General utility commands
pub mod general;

// Export commands
pub use cart::*;
pub use catalog::*;
pub use general::*;

use crate::{bot::BotData, errors::Error};

/// Every command the bot registers.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        general::ping(),
        general::help(),
        catalog::catalog(),
        cart::cart(),
        cart::toggle(),
        cart::quantity(),
    ]
}
