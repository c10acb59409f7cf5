use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};

use crate::storage::errors::StorageError;
use crate::storage::types::CacheData;

use super::types::{CacheStore, RedisCacheStore};

const KEY_NAMESPACE: &str = "cache";

impl RedisCacheStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    fn namespaced(prefix: &str, key: &str) -> String {
        format!("{KEY_NAMESPACE}:{prefix}:{key}")
    }

    async fn connection(&self) -> Result<MultiplexedConnection, StorageError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

// Values are stored as the raw payload string; Redis handles expiry.
#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn init(&self) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    async fn put_with_ttl(
        &mut self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: usize,
    ) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        let _: () = conn
            .set_ex(Self::namespaced(prefix, key), value.value, ttl as u64)
            .await?;
        Ok(())
    }

    async fn get(&self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError> {
        let mut conn = self.connection().await?;
        let payload: Option<String> = conn.get(Self::namespaced(prefix, key)).await?;
        Ok(payload.map(CacheData::new))
    }

    async fn remove(&mut self, prefix: &str, key: &str) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        let _: () = conn.del(Self::namespaced(prefix, key)).await?;
        Ok(())
    }
}
