//! Unified error types for `CartBuddy`.
//!
//! Every fallible operation in the crate returns [`Result`]. Cart operations that
//! leave state untouched on purpose (unknown product, quantity below one) are not
//! errors; only a rejected quantity update surfaces as [`Error::QuotaExceeded`].

use crate::core::product::ProductId;
use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong with the configuration
        message: String,
    },

    /// Storage backend failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The product source could not be reached or returned a bad response
    #[error("Product fetch failed: {message}")]
    Fetch {
        /// Description of the failure
        message: String,
    },

    /// Cart (de)serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A quantity update asked for more than the product currently allows
    #[error("Only {allowed} item(s) available for product {product_id} (requested {requested})")]
    QuotaExceeded {
        /// Product whose update was rejected
        product_id: ProductId,
        /// Quantity the user asked for
        requested: i64,
        /// Maximum quantity accepted right now
        allowed: u32,
    },

    /// A user-supplied product reference matched nothing in the catalog
    #[error("Product not found: {reference}")]
    ProductNotFound {
        /// The id or title that was looked up
        reference: String,
    },

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Self::Fetch {
            message: value.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
