use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Product as returned to clients
///
/// `id` and `created_at` are assigned by the server; the id is the hex form
/// of the store's object id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (`_id` in MongoDB)
    #[serde(alias = "_id")]
    #[schema(example = "65a1b2c3d4e5f60718293a4b")]
    pub id: String,
    #[schema(example = "Tiny Thorny")]
    pub name: String,
    #[schema(example = "A tiny cute cactus.")]
    pub description: String,
    #[schema(example = 890.0)]
    pub price: f64,
    #[schema(example = 50)]
    pub stock_quantity: i64,
    #[schema(example = "Cactus")]
    pub category: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    /// Creation timestamp (UTC, millisecond precision)
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a new product
///
/// Unknown keys are ignored. `id` and `created_at` cannot be supplied.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "name must not be empty"))]
    #[schema(example = "Tiny Thorny")]
    pub name: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    #[schema(example = "A tiny cute cactus.")]
    pub description: String,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    #[schema(example = 890.0)]
    pub price: f64,
    #[validate(range(min = 0, message = "stock_quantity must not be negative"))]
    #[schema(example = 50)]
    pub stock_quantity: i64,
    #[schema(example = "Cactus")]
    pub category: String,
    #[serde(default)]
    #[schema(example = json!(["https://placehold.co/400x400"]))]
    pub image_urls: Vec<String>,
}
