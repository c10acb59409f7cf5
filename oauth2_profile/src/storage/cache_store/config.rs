use std::{env, sync::LazyLock};

use super::types::{CacheStore, InMemoryCacheStore, RedisCacheStore};
use crate::storage::errors::StorageError;

pub static GENERIC_CACHE_STORE_TYPE: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_CACHE_STORE_TYPE").unwrap_or_else(|_| "memory".to_string())
});

pub static GENERIC_CACHE_STORE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_CACHE_STORE_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
});

/// Build the cache store selected by `GENERIC_CACHE_STORE_TYPE` and verify it is reachable.
pub async fn cache_store_from_env() -> Result<Box<dyn CacheStore>, StorageError> {
    let store_type = GENERIC_CACHE_STORE_TYPE.as_str();

    tracing::info!("Initializing cache store with type: {}", store_type);

    let store: Box<dyn CacheStore> = match store_type {
        "memory" => Box::new(InMemoryCacheStore::new()),
        "redis" => {
            let client = redis::Client::open(GENERIC_CACHE_STORE_URL.as_str())?;
            Box::new(RedisCacheStore { client })
        }
        t => return Err(StorageError::UnsupportedStoreType(t.to_string())),
    };

    store.init().await?;

    tracing::info!("Connected to cache store: type={}", store_type);

    Ok(store)
}
