//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Validation happens here, so invalid input never reaches the repository.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// List every product
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list_all().await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use chrono::Utc;

    fn input() -> CreateProduct {
        CreateProduct {
            name: "Tiny Thorny".to_string(),
            description: "A tiny cute cactus.".to_string(),
            price: 890.0,
            stock_quantity: 50,
            category: "Cactus".to_string(),
            image_urls: vec![],
        }
    }

    fn stored(input: CreateProduct) -> Product {
        Product {
            id: "65a1b2c3d4e5f60718293a4b".to_string(),
            name: input.name,
            description: input.description,
            price: input.price,
            stock_quantity: input.stock_quantity,
            category: input.category,
            image_urls: input.image_urls,
            created_at: Utc::now(),
        }
    }

    fn service_rejecting_all_writes() -> ProductService<MockProductRepository> {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().never();
        ProductService::new(mock_repo)
    }

    fn service_accepting_one_write() -> ProductService<MockProductRepository> {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|input| Ok(stored(input)));
        ProductService::new(mock_repo)
    }

    #[tokio::test]
    async fn test_create_delegates_valid_input() {
        let service = service_accepting_one_write();

        let product = service.create_product(input()).await.unwrap();

        assert_eq!(product.name, "Tiny Thorny");
        assert_eq!(product.price, 890.0);
        assert!(!product.id.is_empty());
    }

    #[tokio::test]
    async fn test_negative_price_never_reaches_repository() {
        let service = service_rejecting_all_writes();
        let mut input = input();
        input.price = -0.01;

        let err = service.create_product(input).await.unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_zero_price_is_accepted() {
        let service = service_accepting_one_write();
        let mut input = input();
        input.price = 0.0;

        assert_eq!(service.create_product(input).await.unwrap().price, 0.0);
    }

    #[tokio::test]
    async fn test_negative_stock_never_reaches_repository() {
        let service = service_rejecting_all_writes();
        let mut input = input();
        input.stock_quantity = -1;

        let err = service.create_product(input).await.unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_zero_stock_is_accepted() {
        let service = service_accepting_one_write();
        let mut input = input();
        input.stock_quantity = 0;

        assert_eq!(service.create_product(input).await.unwrap().stock_quantity, 0);
    }

    #[tokio::test]
    async fn test_empty_name_never_reaches_repository() {
        let service = service_rejecting_all_writes();
        let mut input = input();
        input.name = String::new();

        let err = service.create_product(input).await.unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list_all()
            .times(1)
            .returning(|| Err(ProductError::Storage("timed out".to_string())));
        let service = ProductService::new(mock_repo);

        let err = service.list_products().await.unwrap_err();
        assert!(matches!(err, ProductError::Storage(_)));
    }

    #[tokio::test]
    async fn test_empty_list_is_not_an_error() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_list_all().returning(|| Ok(vec![]));
        let service = ProductService::new(mock_repo);

        assert!(service.list_products().await.unwrap().is_empty());
    }
}
