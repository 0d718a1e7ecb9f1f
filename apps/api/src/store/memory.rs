use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{Collection, DocumentStore, StoreError};

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<Value>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        Ok(self
            .collections
            .read()
            .await
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, collection: Collection, records: Vec<Value>) -> Result<(), StoreError> {
        self.collections.write().await.insert(collection, records);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_save_overwrites_whole_collection() {
        let store = MemoryDocumentStore::new();
        store
            .save(Collection::Jobs, vec![json!({"n": 1}), json!({"n": 2})])
            .await
            .unwrap();
        store
            .save(Collection::Jobs, vec![json!({"n": 3})])
            .await
            .unwrap();

        assert_eq!(
            store.get(Collection::Jobs).await.unwrap(),
            vec![json!({"n": 3})]
        );
    }

    #[tokio::test]
    async fn test_collections_are_independent() {
        let store = MemoryDocumentStore::new();
        store
            .save(Collection::Users, vec![json!({"n": 1})])
            .await
            .unwrap();

        assert!(store.get(Collection::Applications).await.unwrap().is_empty());
    }
}
