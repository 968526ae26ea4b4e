/// Database configuration and connection management
pub mod database;

/// Catalog and cart configuration loading from config.toml
pub mod shop;
