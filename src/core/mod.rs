//! Core business logic - framework-agnostic catalog, cart, and quota reconciliation.

/// Cart lines and the stored cart format
pub mod cart;
/// Add/remove toggle and quantity update transitions
pub mod ops;
/// Products, catalog, and quota assignment
pub mod product;
/// Remaining-quota derivation
pub mod reconcile;
/// Session state owning catalog and cart
pub mod session;
/// Product source used to seed the catalog
pub mod source;
/// Durable storage for the cart
pub mod storage;
