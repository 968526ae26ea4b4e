//! Persistence bridge - durable key-value storage for the serialized cart.
//!
//! [`DatabaseStorage`] keeps entries in the `storage_entries` table; each key holds
//! one text value that is replaced on every save. [`MemoryStorage`] offers the same
//! contract without a database.

use crate::{
    core::cart::Cart,
    entities::{StorageEntry, storage_entry},
    errors::Result,
};
use async_trait::async_trait;
use sea_orm::{Set, prelude::*};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Durable key-value storage used to persist the cart.
#[async_trait]
pub trait CartStorage: Send + Sync {
    /// Returns the value stored under `key`, or `None` if nothing was saved yet.
    async fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    async fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// Storage backed by the `storage_entries` table.
#[derive(Debug, Clone)]
pub struct DatabaseStorage {
    db: DatabaseConnection,
}

impl DatabaseStorage {
    /// Wraps an open connection whose tables already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartStorage for DatabaseStorage {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let entry = StorageEntry::find()
            .filter(storage_entry::Column::Key.eq(key))
            .one(&self.db)
            .await?;
        Ok(entry.map(|e| e.value))
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        let now = chrono::Utc::now().naive_utc();

        let existing = StorageEntry::find()
            .filter(storage_entry::Column::Key.eq(key))
            .one(&self.db)
            .await?;

        if let Some(entry) = existing {
            let mut active_model: storage_entry::ActiveModel = entry.into();
            active_model.value = Set(value.to_string());
            active_model.updated_at = Set(now);
            active_model.update(&self.db).await?;
        } else {
            let new_entry = storage_entry::ActiveModel {
                key: Set(key.to_string()),
                value: Set(value.to_string()),
                updated_at: Set(now),
                ..Default::default()
            };
            new_entry.insert(&self.db).await?;
        }

        debug!(key, bytes = value.len(), "Saved storage entry");
        Ok(())
    }
}

/// Process-local storage, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl CartStorage for MemoryStorage {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads the cart stored under `key`.
///
/// A missing entry yields an empty cart. A stored value that cannot be parsed is
/// logged and also treated as an empty cart.
///
/// # Errors
/// Returns an error only if the storage backend itself fails.
pub async fn load_cart(storage: &dyn CartStorage, key: &str) -> Result<Cart> {
    let Some(text) = storage.load(key).await? else {
        debug!(key, "No stored cart, starting empty");
        return Ok(Cart::new());
    };

    match Cart::from_json(&text) {
        Ok(cart) => {
            debug!(key, lines = cart.badge_count(), "Loaded stored cart");
            Ok(cart)
        }
        Err(e) => {
            warn!(key, error = %e, "Stored cart is unreadable, starting empty");
            Ok(Cart::new())
        }
    }
}

/// Serializes `cart` and saves it under `key`.
///
/// # Errors
/// Returns an error if serialization or the storage backend fails.
pub async fn save_cart(storage: &dyn CartStorage, key: &str, cart: &Cart) -> Result<()> {
    let text = cart.to_json()?;
    storage.save(key, &text).await
}
