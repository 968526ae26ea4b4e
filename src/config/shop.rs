//! Shop configuration loading from config.toml
//!
//! Describes where the catalog comes from, how quotas are drawn, and how the
//! cart is stored. Every field has a default, so a missing file or a partial
//! one is fine; a malformed file is an error.

use crate::{
    core::ops::AllowanceRule,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::{ops::RangeInclusive, path::Path};
use tracing::{debug, info};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// Product source and quota settings
    pub catalog: CatalogConfig,
    /// Cart storage and allowance settings
    pub cart: CartConfig,
}

/// `[catalog]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL of the product API
    pub source_url: String,
    /// Number of products to request
    pub limit: u32,
    /// Smallest quota a product can receive
    pub quota_min: u32,
    /// Largest quota a product can receive
    pub quota_max: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source_url: "https://fakestoreapi.com".to_string(),
            limit: 10,
            quota_min: 1,
            quota_max: 5,
        }
    }
}

impl CatalogConfig {
    /// Inclusive range quotas are drawn from.
    #[must_use]
    pub const fn quota_range(&self) -> RangeInclusive<u32> {
        self.quota_min..=self.quota_max
    }
}

/// `[cart]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Key the serialized cart is stored under
    pub storage_key: String,
    /// How the ceiling for quantity updates is computed
    pub allowance: AllowanceRule,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: "cart".to_string(),
            allowance: AllowanceRule::default(),
        }
    }
}

impl ShopConfig {
    /// Parses and validates configuration text.
    ///
    /// # Errors
    /// Returns an error if the TOML is invalid or a value is out of range.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse config.toml: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let catalog = &self.catalog;
        if catalog.quota_min < 1 {
            return Err(Error::Config {
                message: "catalog.quota_min must be at least 1".to_string(),
            });
        }
        if catalog.quota_min > catalog.quota_max {
            return Err(Error::Config {
                message: format!(
                    "catalog.quota_min ({}) is greater than catalog.quota_max ({})",
                    catalog.quota_min, catalog.quota_max
                ),
            });
        }
        if catalog.limit < 1 {
            return Err(Error::Config {
                message: "catalog.limit must be at least 1".to_string(),
            });
        }
        if self.cart.storage_key.trim().is_empty() {
            return Err(Error::Config {
                message: "cart.storage_key cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Loads shop configuration from a TOML file, falling back to defaults when the
/// file does not exist.
///
/// # Errors
/// Returns an error if:
/// - The file exists but cannot be read
/// - The TOML syntax is invalid
/// - A value is out of range
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ShopConfig> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No config file at {:?}, using defaults.", path);
        return Ok(ShopConfig::default());
    }

    debug!("Loading configuration from: {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path:?}: {e}"),
    })?;
    ShopConfig::from_toml(&contents)
}

/// Loads shop configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<ShopConfig> {
    load_config("config.toml")
}
