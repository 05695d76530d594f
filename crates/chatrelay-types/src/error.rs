use thiserror::Error;

/// Errors from the key-value persistence primitive (used by trait definitions
/// in chatrelay-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Errors from conversation operations.
#[derive(Debug, Error)]
pub enum ConversationError {
    /// A required field is missing or malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The persistence primitive could not be read or written.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The inference call failed.
    #[error("inference failure: {0}")]
    InferenceFailure(String),
}

impl From<RepositoryError> for ConversationError {
    fn from(e: RepositoryError) -> Self {
        ConversationError::StorageUnavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_repository_error_maps_to_storage_unavailable() {
        let err: ConversationError = RepositoryError::Connection.into();
        assert!(matches!(err, ConversationError::StorageUnavailable(_)));
        assert_eq!(err.to_string(), "storage unavailable: database connection error");
    }
}
