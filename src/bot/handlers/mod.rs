//! Discord interaction handlers
//!
//! Handlers for Discord interactions other than commands, such as autocomplete.

/// Autocomplete handlers for product references
pub mod autocomplete;
