use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum StorageError {
    /// The backend could not be reached or rejected the command.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unsupported cache store type: {0}")]
    UnsupportedStoreType(String),
}

impl From<redis::RedisError> for StorageError {
    fn from(err: redis::RedisError) -> Self {
        Self::Storage(err.to_string())
    }
}
