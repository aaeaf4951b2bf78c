//! Persistence boundary for sceneflow.
//!
//! The core consumes persistence as a plain key/value contract:
//! `load(key)` yields a JSON document or nothing, `save(key, value)`
//! replaces it. [`LocalStore`] keeps one JSON file per key on disk;
//! [`MemoryStore`] backs tests and short-lived embeddings. The
//! [`session`] module layers the typed session-state keys on top.

use async_trait::async_trait;

pub mod error;
pub mod local;
pub mod memory;
pub mod session;

pub use error::StoreError;
pub use local::LocalStore;
pub use memory::MemoryStore;

/// Key/value JSON persistence.
///
/// Implementations must treat `save` as a full replacement of the
/// value under `key` and `load` of an unknown key as `Ok(None)`.
#[async_trait]
pub trait Store: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError>;

    async fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), StoreError>;
}
