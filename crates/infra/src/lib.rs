//! Infrastructure layer: storefront HTTP client, local cart storage, config.

pub mod config;
pub mod http;
pub mod storage;

pub use config::ClientConfig;
pub use http::HttpStorefront;
pub use storage::{MemoryStorage, SqliteStorage};
