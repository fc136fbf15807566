//! Products domain module.
//!
//! Catalog records as served by the storefront API. The cart copies these into
//! its line items, so the record keeps every attribute the catalog sends.

pub mod product;

pub use product::{Product, ProductAttributes};
