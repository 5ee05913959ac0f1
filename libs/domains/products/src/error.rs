use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Connection is unusable or closed; no I/O was attempted.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(msg) => AppError::Validation(msg),
            ProductError::StorageUnavailable(msg) => AppError::DatabaseUnavailable(msg),
            ProductError::Storage(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Storage(err.to_string())
    }
}

impl From<DatabaseError> for ProductError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Mongo(e) => ProductError::from(e),
            timeout @ DatabaseError::Timeout { .. } => ProductError::Storage(timeout.to_string()),
            unavailable @ (DatabaseError::Unavailable(_) | DatabaseError::Closed) => {
                ProductError::StorageUnavailable(unavailable.to_string())
            }
        }
    }
}
