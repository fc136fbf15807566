//! Inventory domain module.
//!
//! Stock levels reported by the storefront. The client never caches them; each
//! cart operation asks for a fresh [`Stock`].

pub mod stock;

pub use stock::Stock;
