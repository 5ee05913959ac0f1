//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database::{DatabaseResult, bounded, mongodb::MongoConnection};
use futures::TryStreamExt;
use mongodb::{
    Collection,
    bson::{self, Bson, doc, oid::ObjectId},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument};

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product};
use crate::repository::ProductRepository;

/// Collection holding product documents
pub const PRODUCTS_COLLECTION: &str = "products";

/// Stored form of a product
///
/// `_id` is left out on insert so the server assigns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ProductDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock_quantity: i64,
    pub category: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub created_at: bson::DateTime,
}

impl ProductDocument {
    /// Build the document for a new product, stamped at `now`
    pub fn new(input: CreateProduct, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: input.name,
            description: input.description,
            price: input.price,
            stock_quantity: input.stock_quantity,
            category: input.category,
            image_urls: input.image_urls,
            created_at: bson::DateTime::from_millis(millis_not_before(now)),
        }
    }
}

/// Milliseconds since the epoch, rounded up so the stored stamp is never earlier than `now`
fn millis_not_before(now: DateTime<Utc>) -> i64 {
    let millis = now.timestamp_millis();
    if now.timestamp_subsec_nanos() % 1_000_000 == 0 {
        millis
    } else {
        millis + 1
    }
}

/// Public string form of a store identifier (24-char lowercase hex)
pub(crate) fn id_to_string(id: &ObjectId) -> String {
    id.to_hex()
}

impl TryFrom<ProductDocument> for Product {
    type Error = ProductError;

    fn try_from(document: ProductDocument) -> ProductResult<Self> {
        let id = document
            .id
            .as_ref()
            .map(id_to_string)
            .ok_or_else(|| ProductError::Storage("product document has no _id".to_string()))?;

        let millis = document.created_at.timestamp_millis();
        let created_at = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
            ProductError::Storage(format!("product {} has out-of-range created_at", id))
        })?;

        Ok(Product {
            id,
            name: document.name,
            description: document.description,
            price: document.price,
            stock_quantity: document.stock_quantity,
            category: document.category,
            image_urls: document.image_urls,
            created_at,
        })
    }
}

/// Single round-trips against the products collection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub(crate) trait ProductStore: Send + Sync {
    /// Insert one document, returning the `_id` the server assigned
    async fn insert(&self, document: &ProductDocument) -> DatabaseResult<Bson>;

    async fn find_by_id(&self, id: ObjectId) -> DatabaseResult<Option<ProductDocument>>;

    async fn find_all(&self) -> DatabaseResult<Vec<ProductDocument>>;
}

/// The products collection with every round-trip capped at `limit`
struct BoundedCollection {
    collection: Collection<ProductDocument>,
    limit: Duration,
}

#[async_trait]
impl ProductStore for BoundedCollection {
    async fn insert(&self, document: &ProductDocument) -> DatabaseResult<Bson> {
        let result = bounded(self.limit, "insert_one", self.collection.insert_one(document)).await?;
        Ok(result.inserted_id)
    }

    async fn find_by_id(&self, id: ObjectId) -> DatabaseResult<Option<ProductDocument>> {
        bounded(
            self.limit,
            "find_one",
            self.collection.find_one(doc! { "_id": id }),
        )
        .await
    }

    async fn find_all(&self) -> DatabaseResult<Vec<ProductDocument>> {
        bounded(self.limit, "find", async {
            let cursor = self.collection.find(doc! {}).await?;
            Ok::<_, mongodb::error::Error>(cursor.try_collect::<Vec<ProductDocument>>().await?)
        })
        .await
    }
}

/// Insert a new product and return it as the store now holds it
async fn insert_and_read_back<S>(
    store: &S,
    input: CreateProduct,
    now: DateTime<Utc>,
) -> ProductResult<Product>
where
    S: ProductStore + ?Sized,
{
    let document = ProductDocument::new(input, now);

    let inserted_id = store.insert(&document).await?;
    let id = inserted_id.as_object_id().ok_or_else(|| {
        ProductError::Storage(format!("insert returned a non-ObjectId _id: {}", inserted_id))
    })?;

    let stored = store.find_by_id(id).await?.ok_or_else(|| {
        ProductError::Storage(format!(
            "product {} could not be read back",
            id_to_string(&id)
        ))
    })?;

    Product::try_from(stored)
}

async fn load_all<S>(store: &S) -> ProductResult<Vec<Product>>
where
    S: ProductStore + ?Sized,
{
    let documents = store.find_all().await?;
    documents.into_iter().map(Product::try_from).collect()
}

/// MongoDB implementation of the ProductRepository
///
/// Holds the shared connection rather than a collection so that an unusable or
/// closed connection is reported before any I/O.
#[derive(Clone)]
pub struct MongoProductRepository {
    connection: MongoConnection,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository over the shared connection
    pub fn new(connection: MongoConnection) -> Self {
        Self { connection }
    }

    fn store(&self) -> ProductResult<BoundedCollection> {
        let database = self.connection.database()?;
        Ok(BoundedCollection {
            collection: database.collection::<ProductDocument>(PRODUCTS_COLLECTION),
            limit: self.connection.operation_timeout(),
        })
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let store = self.store()?;
        let product = insert_and_read_back(&store, input, Utc::now()).await?;
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> ProductResult<Vec<Product>> {
        let store = self.store()?;
        load_all(&store).await
    }
}
