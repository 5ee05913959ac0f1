//! Database library providing the MongoDB connection lifecycle and health probes
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - All features
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, MongoConnection};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "casacore_db");
//! let connection = MongoConnection::open(&config).await;
//!
//! if connection.ping().await {
//!     let db = connection.database()?;
//!     let products = db.collection::<Document>("products");
//! }
//!
//! connection.close().await;
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult, bounded};
