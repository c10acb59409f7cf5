use serde::{Deserialize, Serialize};

/// Serialized session state as held by a [`CacheStore`](super::CacheStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheData {
    pub value: String,
}

impl CacheData {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}
