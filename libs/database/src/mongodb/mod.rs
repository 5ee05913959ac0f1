//! MongoDB connection lifecycle and health probes
//!
//! [`MongoConnection`] owns the single pooled client of the process:
//! opened once at start-up, shared by cloning, closed once at shutdown.

mod config;
mod connector;
mod health;

pub use config::{
    CONNECT_TIMEOUT_SECS, DEFAULT_DATABASE, MAX_POOL_SIZE, MIN_POOL_SIZE, MongoConfig,
    OPERATION_TIMEOUT_SECS, SERVER_SELECTION_TIMEOUT_SECS,
};
pub use connector::{ConnectionState, MongoConnection};
pub use health::{HealthStatus, check_health, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
