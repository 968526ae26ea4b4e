//! Shopping session - the single owner of catalog and cart state.
//!
//! Every mutation goes through [`Session::toggle`] or [`Session::update_quantity`].
//! A committed mutation is saved to storage first; only when the save succeeds is
//! the in-memory cart replaced, the catalog reconciled, and the new catalog
//! published to subscribers.

use crate::{
    core::{
        cart::Cart,
        ops::{self, AllowanceRule, CartChange, Transition},
        product::{Catalog, ProductId},
        reconcile::reconcile_in_place,
        storage::{CartStorage, load_cart, save_cart},
    },
    errors::{Error, Result},
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Session-scoped catalog and cart.
pub struct Session {
    catalog: Catalog,
    cart: Cart,
    storage: Box<dyn CartStorage>,
    storage_key: String,
    allowance: AllowanceRule,
    view: watch::Sender<Catalog>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("catalog", &self.catalog)
            .field("cart", &self.cart)
            .field("storage_key", &self.storage_key)
            .field("allowance", &self.allowance)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Starts a session from a freshly loaded catalog and the stored cart.
    ///
    /// Stored lines holding more than their product's newly assigned quota are
    /// clamped to it, and the clamped cart is saved back. Lines for products the
    /// catalog no longer lists are kept as they are.
    ///
    /// # Errors
    /// Returns an error if the storage backend fails.
    pub async fn start(
        mut catalog: Catalog,
        storage: Box<dyn CartStorage>,
        storage_key: impl Into<String>,
        allowance: AllowanceRule,
    ) -> Result<Self> {
        let storage_key = storage_key.into();
        let mut cart = load_cart(storage.as_ref(), &storage_key).await?;

        let clamped = clamp_to_quotas(&mut cart, &catalog);
        if clamped > 0 {
            save_cart(storage.as_ref(), &storage_key, &cart).await?;
        }

        reconcile_in_place(&cart, &mut catalog);
        let (view, _) = watch::channel(catalog.clone());

        info!(
            "Session started with {} products and {} cart lines.",
            catalog.len(),
            cart.badge_count()
        );

        Ok(Self {
            catalog,
            cart,
            storage,
            storage_key,
            allowance,
            view,
        })
    }

    /// Reconciled catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn badge_count(&self) -> usize {
        self.cart.badge_count()
    }

    /// Rule used to bound quantity updates.
    #[must_use]
    pub const fn allowance(&self) -> AllowanceRule {
        self.allowance
    }

    /// Largest quantity `id` may currently be set to, if it is a catalog product.
    #[must_use]
    pub fn allowed_quantity(&self, id: ProductId) -> Option<u32> {
        self.catalog
            .get(id)
            .map(|product| self.allowance.allowed(product, &self.cart))
    }

    /// Resolves a user-supplied product id or title to the product's id and title.
    ///
    /// The catalog is searched first. Cart lines whose product the catalog no
    /// longer lists are matched next, so they can still be toggled out.
    ///
    /// # Errors
    /// Returns [`Error::ProductNotFound`] when neither the catalog nor the cart
    /// matches `reference`.
    pub fn find_product(&self, reference: &str) -> Result<(ProductId, String)> {
        if let Some(product) = self.catalog.find_by_reference(reference) {
            return Ok((product.id(), product.listing.title.clone()));
        }

        let trimmed = reference.trim();
        let lowered = trimmed.to_lowercase();
        self.cart
            .lines()
            .find(|line| {
                line.id().to_string() == trimmed || line.snapshot.title.to_lowercase() == lowered
            })
            .map(|line| (line.id(), line.snapshot.title.clone()))
            .ok_or_else(|| Error::ProductNotFound {
                reference: trimmed.to_string(),
            })
    }

    /// Receiver that observes every reconciled catalog, starting with the current one.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Catalog> {
        self.view.subscribe()
    }

    /// Adds `id` with quantity 1, or removes its line if already present.
    ///
    /// # Errors
    /// Returns an error if saving the new cart fails; the session is unchanged then.
    pub async fn toggle(&mut self, id: ProductId) -> Result<CartChange> {
        let transition = ops::toggle(&self.cart, &self.catalog, id);
        self.apply(transition).await
    }

    /// Replaces the quantity of an existing line.
    ///
    /// # Errors
    /// Returns [`crate::errors::Error::QuotaExceeded`] when `new_qty` is above the
    /// allowed amount, or a storage error if saving fails. The session is unchanged
    /// in both cases.
    pub async fn update_quantity(&mut self, id: ProductId, new_qty: i64) -> Result<CartChange> {
        let transition =
            match ops::set_quantity(&self.cart, &self.catalog, id, new_qty, self.allowance) {
                Ok(transition) => transition,
                Err(e) => {
                    info!("Rejected quantity update for product {}: {}", id, e);
                    return Err(e);
                }
            };
        self.apply(transition).await
    }

    async fn apply(&mut self, transition: Transition) -> Result<CartChange> {
        match transition {
            Transition::Keep(reason) => {
                debug!(?reason, "Cart operation ignored");
                Ok(CartChange::Unchanged(reason))
            }
            Transition::Apply(next, change) => {
                self.commit(next).await?;
                info!(?change, badge = self.badge_count(), "Cart updated");
                Ok(change)
            }
        }
    }

    async fn commit(&mut self, next: Cart) -> Result<()> {
        save_cart(self.storage.as_ref(), &self.storage_key, &next).await?;
        self.cart = next;
        reconcile_in_place(&self.cart, &mut self.catalog);
        self.view.send_replace(self.catalog.clone());
        Ok(())
    }
}

/// Lowers stored quantities that exceed the product's quota, returning how many
/// lines were changed.
fn clamp_to_quotas(cart: &mut Cart, catalog: &Catalog) -> usize {
    let mut clamped = 0;
    for product in catalog.products() {
        let Some(line) = cart.get_mut(product.id()) else {
            continue;
        };
        if line.quantity > product.original_quota {
            warn!(
                "Stored quantity {} for product {} exceeds quota {}, clamping.",
                line.quantity,
                product.id(),
                product.original_quota
            );
            line.quantity = product.original_quota;
            clamped += 1;
        }
    }
    clamped
}
