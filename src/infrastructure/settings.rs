//! In-memory settings store
//!
//! Reference implementation of the settings port for tests and for hosts
//! that manage persistence themselves. Writes are visible immediately,
//! which matches the host guarantee that a write confirms before the next
//! change notification for the same key.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{SettingsError, SettingsStorePort};

/// World-scoped key-value store backed by a hash map
#[derive(Default)]
pub struct MemorySettingsStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value directly, bypassing the port (fixture setup)
    pub async fn preload(&self, key: &str, value: Value) {
        self.values.write().await.insert(key.to_string(), value);
    }
}

#[async_trait]
impl SettingsStorePort for MemorySettingsStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, SettingsError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), SettingsError> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemorySettingsStore::new();
        assert_eq!(store.get("missing").await.unwrap(), None);

        store.set("enable", json!(true)).await.unwrap();
        assert_eq!(store.get("enable").await.unwrap(), Some(json!(true)));

        store.remove("enable").await.unwrap();
        assert_eq!(store.get("enable").await.unwrap(), None);
    }
}
