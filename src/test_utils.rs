//! Shared test utilities for `CartBuddy`.
//!
//! Helpers for setting up test databases and building catalogs with known quotas.

use crate::{
    core::{
        product::{Catalog, ProductId, ProductListing},
        storage::CartStorage,
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

/// Routes tracing output to the test harness; safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A listing with the given id and price and a generated title.
#[must_use]
pub fn listing(id: u64, price: f64) -> ProductListing {
    ProductListing {
        id: ProductId(id),
        title: format!("Product {id}"),
        price,
        image: format!("https://example.test/{id}.jpg"),
    }
}

/// Three listings shaped like the public fakestore feed.
#[must_use]
pub fn sample_listings() -> Vec<ProductListing> {
    vec![
        ProductListing {
            id: ProductId(1),
            title: "Fjallraven Backpack".to_string(),
            price: 109.95,
            image: "https://example.test/1.jpg".to_string(),
        },
        ProductListing {
            id: ProductId(2),
            title: "Mens Casual Premium T-Shirt".to_string(),
            price: 22.3,
            image: "https://example.test/2.jpg".to_string(),
        },
        ProductListing {
            id: ProductId(3),
            title: "Mens Casual Slim Fit".to_string(),
            price: 15.99,
            image: "https://example.test/3.jpg".to_string(),
        },
    ]
}

/// Quota assigner returning fixed values per product id, 1 for unknown ids.
pub fn quotas(pairs: &[(u64, u32)]) -> impl FnMut(&ProductListing) -> u32 + use<> {
    let table: HashMap<u64, u32> = pairs.iter().copied().collect();
    move |listing: &ProductListing| table.get(&listing.id.0).copied().unwrap_or(1)
}

/// Catalog with one generated listing per `(id, original_quota)` pair.
#[must_use]
pub fn sample_catalog(pairs: &[(u64, u32)]) -> Catalog {
    let listings = pairs.iter().map(|&(id, _)| listing(id, 10.0)).collect();
    Catalog::from_listings(listings, &mut quotas(pairs))
}

/// Storage whose writes always fail.
pub struct FailingStorage;

#[async_trait]
impl CartStorage for FailingStorage {
    async fn load(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn save(&self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::Database(DbErr::Custom("disk full".to_string())))
    }
}
