use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage unavailable for '{key}': {reason}")]
    StorageUnavailable { key: String, reason: String },

    #[error("Stored value under '{key}' could not be parsed: {reason}")]
    DeserializationFailure { key: String, reason: String },

    #[error("Write to '{key}' was not committed: {reason}")]
    WriteFailure { key: String, reason: String },

    #[error("Unknown collection '{0}'")]
    UnknownCollection(String),

    #[error("Record '{id}' not found in '{key}'")]
    RecordNotFound { key: String, id: String },
}

impl StoreError {
    pub fn unavailable(key: &str, reason: impl ToString) -> Self {
        Self::StorageUnavailable {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn deserialization(key: &str, reason: impl ToString) -> Self {
        Self::DeserializationFailure {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn write(key: &str, reason: impl ToString) -> Self {
        Self::WriteFailure {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    /// The storage key the error refers to, when it has one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::StorageUnavailable { key, .. }
            | Self::DeserializationFailure { key, .. }
            | Self::WriteFailure { key, .. }
            | Self::RecordNotFound { key, .. } => Some(key),
            Self::UnknownCollection(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
