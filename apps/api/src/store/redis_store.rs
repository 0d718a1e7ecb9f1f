use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use serde_json::Value;
use tracing::{debug, info};

use super::{Collection, DocumentStore, StoreError};

/// Redis-backed store. Each collection is one string key holding a JSON array,
/// named `<namespace>:<collection>`.
#[derive(Clone)]
pub struct RedisDocumentStore {
    conn: MultiplexedConnection,
    namespace: String,
}

impl RedisDocumentStore {
    pub async fn connect(url: &str, namespace: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_multiplexed_tokio_connection().await?;
        info!("Redis document store connected (namespace: {namespace})");

        Ok(Self {
            conn,
            namespace: namespace.to_string(),
        })
    }

    fn key_for(&self, collection: Collection) -> String {
        collection_key(&self.namespace, collection)
    }
}

#[async_trait]
impl DocumentStore for RedisDocumentStore {
    async fn get(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        let key = self.key_for(collection);
        let mut conn = self.conn.clone();

        let mut cmd = redis::cmd("GET");
        cmd.arg(&key);
        let payload: Option<String> = cmd.query_async(&mut conn).await?;

        match payload {
            Some(raw) => decode_payload(collection, &raw),
            None => {
                debug!("Collection {key} not present, returning empty");
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, collection: Collection, records: Vec<Value>) -> Result<(), StoreError> {
        let key = self.key_for(collection);
        let payload = serde_json::to_string(&records)?;
        let mut conn = self.conn.clone();

        let mut cmd = redis::cmd("SET");
        cmd.arg(&key).arg(payload);
        let () = cmd.query_async(&mut conn).await?;

        debug!("Saved {} records to {key}", records.len());
        Ok(())
    }
}

fn collection_key(namespace: &str, collection: Collection) -> String {
    format!("{namespace}:{}", collection.key())
}

fn decode_payload(collection: Collection, raw: &str) -> Result<Vec<Value>, StoreError> {
    match serde_json::from_str(raw)? {
        Value::Array(records) => Ok(records),
        _ => Err(StoreError::Corrupt(collection.key())),
    }
}
