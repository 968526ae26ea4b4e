//! Product catalog - listings from the product source, annotated with quotas.
//!
//! A [`Catalog`] is built once per session from the listings returned by the
//! product source. Each product receives an immutable `original_quota` from a
//! [`QuotaAssigner`]; the derived `quota` field is only ever written by the
//! reconciler in [`crate::core::reconcile`].

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{fmt, ops::RangeInclusive};

/// Stable identifier of a product, as reported by the product source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product as delivered by the product source, before any quota is attached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductListing {
    /// Unique identifier
    pub id: ProductId,
    /// Display title
    pub title: String,
    /// Unit price
    pub price: f64,
    /// Image URL
    pub image: String,
}

/// A catalog product with its quota ceiling and remaining availability.
#[derive(Clone, Debug, PartialEq)]
pub struct Product {
    /// Display attributes captured from the product source
    pub listing: ProductListing,
    /// Ceiling assigned at catalog load time, never changed afterwards
    pub original_quota: u32,
    /// `original_quota` minus the quantity held in the cart
    pub quota: u32,
}

impl Product {
    /// Creates a product with its full quota available.
    #[must_use]
    pub const fn new(listing: ProductListing, original_quota: u32) -> Self {
        Self {
            listing,
            original_quota,
            quota: original_quota,
        }
    }

    /// Product identifier.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.listing.id
    }

    /// Whether another unit can be put in the cart.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.quota >= 1
    }
}

/// Source of per-product quota ceilings.
///
/// Implemented for [`RandomQuota`] and for any `FnMut(&ProductListing) -> u32`,
/// so tests can pin quotas to known values.
pub trait QuotaAssigner {
    /// Returns the original quota for `listing`. Values below 1 are raised to 1.
    fn assign(&mut self, listing: &ProductListing) -> u32;
}

impl<F> QuotaAssigner for F
where
    F: FnMut(&ProductListing) -> u32,
{
    fn assign(&mut self, listing: &ProductListing) -> u32 {
        self(listing)
    }
}

/// Uniformly random quotas drawn from an inclusive range.
#[derive(Debug)]
pub struct RandomQuota<R> {
    rng: R,
    range: RangeInclusive<u32>,
}

impl<R: Rng> RandomQuota<R> {
    /// Creates an assigner drawing from `range` with the given random source.
    #[must_use]
    pub const fn new(rng: R, range: RangeInclusive<u32>) -> Self {
        Self { rng, range }
    }
}

impl<R: Rng> QuotaAssigner for RandomQuota<R> {
    fn assign(&mut self, _listing: &ProductListing) -> u32 {
        self.rng.gen_range(self.range.clone())
    }
}

/// Ordered collection of catalog products.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog from source listings, assigning each product a quota.
    ///
    /// Listing order is preserved. Quotas below 1 are raised to 1 so every product
    /// can be added at least once.
    pub fn from_listings<Q>(listings: Vec<ProductListing>, assigner: &mut Q) -> Self
    where
        Q: QuotaAssigner + ?Sized,
    {
        let products = listings
            .into_iter()
            .map(|listing| {
                let original_quota = assigner.assign(&listing).max(1);
                Product::new(listing, original_quota)
            })
            .collect();
        Self { products }
    }

    /// Wraps already-built products.
    #[must_use]
    pub const fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products in source order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no products, e.g. after a failed fetch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Resolves a user-typed reference: a numeric id, or a case-insensitive title.
    #[must_use]
    pub fn find_by_reference(&self, reference: &str) -> Option<&Product> {
        let reference = reference.trim();
        if let Some(product) = reference
            .parse::<u64>()
            .ok()
            .and_then(|raw| self.get(ProductId(raw)))
        {
            return Some(product);
        }
        let lowered = reference.to_lowercase();
        self.products
            .iter()
            .find(|p| p.listing.title.to_lowercase() == lowered)
    }

    pub(crate) fn products_mut(&mut self) -> &mut [Product] {
        &mut self.products
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::sample_listings;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_from_listings_preserves_order_and_sets_full_quota() {
        let catalog = Catalog::from_listings(sample_listings(), &mut |_: &ProductListing| 3);

        let ids: Vec<u64> = catalog.products().iter().map(|p| p.id().0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        for product in catalog.products() {
            assert_eq!(product.original_quota, 3);
            assert_eq!(product.quota, 3);
        }
    }

    #[test]
    fn test_zero_quota_is_raised_to_one() {
        let catalog = Catalog::from_listings(sample_listings(), &mut |_: &ProductListing| 0);
        assert!(catalog.products().iter().all(|p| p.original_quota == 1));
    }

    #[test]
    fn test_random_quota_stays_in_range() {
        let mut assigner = RandomQuota::new(StdRng::seed_from_u64(42), 1..=5);
        let listing = sample_listings().remove(0);
        for _ in 0..200 {
            let quota = assigner.assign(&listing);
            assert!((1..=5).contains(&quota));
        }
    }

    #[test]
    fn test_random_quota_is_reproducible_with_same_seed() {
        let mut first = RandomQuota::new(StdRng::seed_from_u64(7), 1..=5);
        let mut second = RandomQuota::new(StdRng::seed_from_u64(7), 1..=5);

        let a = Catalog::from_listings(sample_listings(), &mut first);
        let b = Catalog::from_listings(sample_listings(), &mut second);
        assert_eq!(a, b);
    }

    #[test]
    fn test_find_by_reference_matches_id_or_title() {
        let catalog = Catalog::from_listings(sample_listings(), &mut |_: &ProductListing| 2);

        assert_eq!(catalog.find_by_reference("2").unwrap().id(), ProductId(2));
        assert_eq!(
            catalog.find_by_reference("  mens casual slim fit ").unwrap().id(),
            ProductId(3)
        );
        assert!(catalog.find_by_reference("nothing like this").is_none());
        assert!(catalog.find_by_reference("99").is_none());
    }

    #[test]
    fn test_listing_ignores_unknown_source_fields() {
        let json = r#"{
            "id": 1,
            "title": "Backpack",
            "price": 109.95,
            "description": "Your perfect pack",
            "category": "men's clothing",
            "image": "https://example.test/1.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;
        let listing: ProductListing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.id, ProductId(1));
        assert_eq!(listing.title, "Backpack");
    }
}
