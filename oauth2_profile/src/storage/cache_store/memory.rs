use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;

use crate::storage::errors::StorageError;
use crate::storage::types::CacheData;

use super::types::{CacheStore, InMemoryCacheStore};

const KEY_NAMESPACE: &str = "cache";

impl InMemoryCacheStore {
    pub fn new() -> Self {
        tracing::info!("Creating in-memory session cache");
        Self {
            entry: HashMap::new(),
        }
    }

    fn namespaced(prefix: &str, key: &str) -> String {
        format!("{KEY_NAMESPACE}:{prefix}:{key}")
    }
}

impl Default for InMemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn init(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn put_with_ttl(
        &mut self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: usize,
    ) -> Result<(), StorageError> {
        let expires_at = i64::try_from(ttl)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .ok_or_else(|| StorageError::Storage("TTL value too large".to_string()))?;

        // Expired entries are dropped lazily on write.
        let now = Utc::now();
        self.entry.retain(|_, (_, exp)| *exp > now);

        self.entry
            .insert(Self::namespaced(prefix, key), (value, expires_at));
        Ok(())
    }

    async fn get(&self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError> {
        let key = Self::namespaced(prefix, key);
        Ok(self
            .entry
            .get(&key)
            .filter(|(_, expires_at)| *expires_at > Utc::now())
            .map(|(value, _)| value.clone()))
    }

    async fn remove(&mut self, prefix: &str, key: &str) -> Result<(), StorageError> {
        let key = Self::namespaced(prefix, key);
        self.entry.remove(&key);
        Ok(())
    }
}
