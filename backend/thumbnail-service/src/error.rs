/// Error types for Thumbnail Service
///
/// Every variant is a hard failure of one invocation. Ineligible keys are not
/// errors and never reach this module; they short-circuit to a skipped outcome.
use crate::services::storage::StorageError;
use thiserror::Error;

/// Result type for thumbnail-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Trigger payload is missing records or required fields
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    /// Object store read or write failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Source bytes are not a decodable image
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// Thumbnail could not be encoded
    #[error("Failed to encode image: {0}")]
    Encode(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Pipeline stage an error belongs to, used as a log field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedEvent,
    Storage,
    Decode,
    Encode,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedEvent => "malformed_event",
            ErrorKind::Storage => "storage",
            ErrorKind::Decode => "decode",
            ErrorKind::Encode => "encode",
            ErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::MalformedEvent(_) => ErrorKind::MalformedEvent,
            AppError::Storage(_) => ErrorKind::Storage,
            AppError::Decode(_) => ErrorKind::Decode,
            AppError::Encode(_) => ErrorKind::Encode,
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedEvent(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_converts_with_kind() {
        let err: AppError = StorageError::NotFound {
            bucket: "b".to_string(),
            key: "k".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(err.to_string().contains("Object not found"));
    }

    #[test]
    fn test_json_error_is_malformed_event() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::MalformedEvent);
        assert_eq!(err.kind().to_string(), "malformed_event");
    }
}
