use crate::session::{errors::SessionError, types::SessionState};

use crate::storage::CacheData;

impl TryFrom<&SessionState> for CacheData {
    type Error = SessionError;

    fn try_from(state: &SessionState) -> Result<Self, Self::Error> {
        Ok(Self {
            value: serde_json::to_string(state).map_err(|e| SessionError::Serde(e.to_string()))?,
        })
    }
}

impl TryFrom<CacheData> for SessionState {
    type Error = SessionError;

    fn try_from(data: CacheData) -> Result<Self, Self::Error> {
        serde_json::from_str(&data.value).map_err(|e| SessionError::Serde(e.to_string()))
    }
}
