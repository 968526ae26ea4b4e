//! Product source - the read-only feed the catalog is seeded from.
//!
//! The catalog is fetched exactly once per session. A failed fetch is logged and
//! leaves the catalog empty; there is no retry and no partial application.

use crate::{
    core::product::{Catalog, ProductListing, QuotaAssigner},
    errors::{Error, Result},
};
use async_trait::async_trait;
use tracing::{error, info};

/// A read-only source of product listings.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetches the full ordered product list.
    async fn fetch_products(&self) -> Result<Vec<ProductListing>>;
}

/// Fetches listings over HTTP from a fakestore-compatible API.
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    client: reqwest::Client,
    base_url: String,
    limit: u32,
}

impl HttpProductSource {
    /// Creates a source reading `{base_url}/products?limit={limit}`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, limit: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            limit,
        }
    }

    /// Full request URL.
    #[must_use]
    pub fn products_url(&self) -> String {
        format!(
            "{}/products?limit={}",
            self.base_url.trim_end_matches('/'),
            self.limit
        )
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn fetch_products(&self) -> Result<Vec<ProductListing>> {
        let url = self.products_url();
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Fetch {
                message: format!("{url} returned {}", response.status()),
            });
        }

        response.json().await.map_err(|e| Error::Fetch {
            message: format!("failed to decode product list from {url}: {e}"),
        })
    }
}

/// A fixed list of listings, for offline use and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticProductSource {
    listings: Vec<ProductListing>,
}

impl StaticProductSource {
    /// Creates a source that always yields `listings`.
    #[must_use]
    pub const fn new(listings: Vec<ProductListing>) -> Self {
        Self { listings }
    }
}

#[async_trait]
impl ProductSource for StaticProductSource {
    async fn fetch_products(&self) -> Result<Vec<ProductListing>> {
        Ok(self.listings.clone())
    }
}

/// Fetches listings and builds the session catalog.
///
/// Fetch failures are logged and produce an empty catalog.
pub async fn load_catalog<Q>(source: &dyn ProductSource, assigner: &mut Q) -> Catalog
where
    Q: QuotaAssigner + ?Sized,
{
    match source.fetch_products().await {
        Ok(listings) => {
            let catalog = Catalog::from_listings(listings, assigner);
            info!("Catalog loaded with {} products.", catalog.len());
            catalog
        }
        Err(e) => {
            error!("Error fetching products: {}", e);
            Catalog::default()
        }
    }
}
