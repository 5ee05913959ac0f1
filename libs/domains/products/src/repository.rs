use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product};

/// Repository trait for Product persistence
///
/// Inputs reaching the repository are already validated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Stamp `created_at`, insert, and return the record as read back from the store
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Every stored product, in store order
    async fn list_all(&self) -> ProductResult<Vec<Product>>;
}
