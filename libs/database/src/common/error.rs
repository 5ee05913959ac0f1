use std::time::Duration;

/// Unified database error type for all database operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// MongoDB driver errors
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// The connection could not be initialized at start-up
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    /// The connection has been closed during shutdown
    #[error("Database connection is closed")]
    Closed,

    /// A round-trip got no reply within the operation timeout
    #[error("Database operation `{operation}` timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DatabaseError::Unavailable("invalid scheme".to_string());
        assert_eq!(err.to_string(), "Database unavailable: invalid scheme");
        assert_eq!(DatabaseError::Closed.to_string(), "Database connection is closed");
    }

    #[test]
    fn test_timeout_message_names_the_operation() {
        let err = DatabaseError::Timeout {
            operation: "find",
            after: Duration::from_secs(30),
        };
        assert_eq!(
            err.to_string(),
            "Database operation `find` timed out after 30s"
        );
    }
}
