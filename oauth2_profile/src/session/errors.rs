use thiserror::Error;

use crate::storage::StorageError;
use crate::utils::UtilError;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serde error: {0}")]
    Serde(String),

    /// A credential record is missing the fields needed to refresh it.
    #[error("Incomplete credentials: missing {0}")]
    IncompleteCredentials(&'static str),

    #[error("Cookie error: {0}")]
    Cookie(String),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}
