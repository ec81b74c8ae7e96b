//! Durable key-value storage for the STYLiSH client.
//!
//! Values are serialized to JSON and kept in a single file so they survive
//! process restarts, the way browser local storage does for the web client.
//!
//! # Example
//!
//! ```rust,no_run
//! use stylish_cache::Cache;
//!
//! let mut cache = Cache::open("/tmp/stylish/storage.json")?;
//!
//! // Store a value
//! cache.set("sessionToken", &"abc123")?;
//!
//! // Retrieve a value
//! let token: Option<String> = cache.get("sessionToken")?;
//!
//! // Delete a value
//! cache.delete("sessionToken")?;
//! # Ok::<(), stylish_cache::CacheError>(())
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError};
}
