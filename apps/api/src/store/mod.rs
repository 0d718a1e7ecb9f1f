//! Collection-keyed JSON persistence.
//!
//! A collection is read and written whole: `get` returns every record (empty
//! when the key was never written) and `save` overwrites the collection.
//! There is no isolation between a read and the following write, so two
//! writers racing on one collection lose one of the updates.
//!
//! Backends: `MemoryDocumentStore` (tests, local runs) and
//! `RedisDocumentStore` (one string key per collection).

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

pub mod memory;
pub mod redis_store;

pub use self::memory::MemoryDocumentStore;
pub use self::redis_store::RedisDocumentStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(#[from] redis::RedisError),

    #[error("Record codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("Collection '{0}' holds a non-array payload")]
    Corrupt(&'static str),
}

/// The collections the portal persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Jobs,
    Applications,
}

impl Collection {
    pub fn key(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Jobs => "jobs",
            Collection::Applications => "applications",
        }
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: Collection) -> Result<Vec<Value>, StoreError>;

    async fn save(&self, collection: Collection, records: Vec<Value>) -> Result<(), StoreError>;
}

/// Reads a collection and decodes every record as `T`.
pub async fn load<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
) -> Result<Vec<T>, StoreError> {
    store
        .get(collection)
        .await?
        .into_iter()
        .map(|record| serde_json::from_value(record).map_err(StoreError::Codec))
        .collect()
}

/// Encodes `records` and overwrites the collection with them.
pub async fn persist<T: Serialize>(
    store: &dyn DocumentStore,
    collection: Collection,
    records: &[T],
) -> Result<(), StoreError> {
    let encoded = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    store.save(collection, encoded).await
}
