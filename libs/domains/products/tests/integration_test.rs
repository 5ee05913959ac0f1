//! Integration tests for the MongoDB product repository
//!
//! These run against a real MongoDB container and need Docker:
//!
//! ```sh
//! cargo test -p domain_products --test integration_test -- --ignored
//! ```

use chrono::Utc;
use domain_products::*;
use test_utils::assertions::assert_object_id_hex;
use test_utils::{TestDataBuilder, TestMongo};

fn input(name: &str) -> CreateProduct {
    CreateProduct {
        name: name.to_string(),
        description: "A tiny cute cactus.".to_string(),
        price: 890.0,
        stock_quantity: 50,
        category: "Cactus".to_string(),
        image_urls: vec!["https://placehold.co/400x400".to_string()],
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_reads_back_the_stored_record() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("create_reads_back");
    let service =
        ProductService::new(MongoProductRepository::new(mongo.connection(&builder.database_name())));

    let name = builder.name("product", "cactus");
    let before = Utc::now();
    let created = service.create_product(input(&name)).await.unwrap();

    assert_object_id_hex(&created.id, "created product id");
    assert!(created.created_at >= before);
    assert_eq!(created.name, name);
    assert_eq!(created.description, "A tiny cute cactus.");
    assert_eq!(created.price, 890.0);
    assert_eq!(created.stock_quantity, 50);
    assert_eq!(created.category, "Cactus");
    assert_eq!(created.image_urls, vec!["https://placehold.co/400x400"]);

    let listed = service.list_products().await.unwrap();
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_list_on_empty_collection_is_empty() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("list_empty");
    let repository = MongoProductRepository::new(mongo.connection(&builder.database_name()));

    assert!(repository.list_all().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_identical_creates_get_distinct_ids() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("identical_creates");
    let repository = MongoProductRepository::new(mongo.connection(&builder.database_name()));

    let name = builder.name("product", "twin");
    let first = repository.create(input(&name)).await.unwrap();
    let second = repository.create(input(&name)).await.unwrap();
    assert_ne!(first.id, second.id);

    let listed = repository.list_all().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&first));
    assert!(listed.contains(&second));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_closed_connection_is_storage_unavailable() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("closed_connection");
    let connection = mongo.connection(&builder.database_name());
    let repository = MongoProductRepository::new(connection.clone());

    repository.create(input("before close")).await.unwrap();
    connection.close().await;

    let err = repository.list_all().await.unwrap_err();
    assert!(matches!(err, ProductError::StorageUnavailable(_)));
}
