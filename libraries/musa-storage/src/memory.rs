//! In-memory documents for tests and ephemeral sessions

use async_trait::async_trait;
use musa_core::DocumentStore;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Document held in process memory
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            values: RwLock::new(entries.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, key: &str) -> musa_core::Result<Option<Value>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> musa_core::Result<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
