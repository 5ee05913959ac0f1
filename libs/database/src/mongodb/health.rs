use mongodb::bson::doc;
use std::time::Instant;
use tracing::{debug, warn};

use super::MongoConnection;
use crate::common::{DatabaseResult, bounded};

/// Database used for liveness commands. The target database may not exist yet
/// (MongoDB creates it on first write), `admin` always does.
const ADMIN_DATABASE: &str = "admin";

/// Health check status for MongoDB
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the database is healthy
    pub healthy: bool,
    /// Optional message (e.g., error details)
    pub message: Option<String>,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

async fn ping_admin(connection: &MongoConnection) -> DatabaseResult<()> {
    let client = connection.client()?;
    let admin = client.database(ADMIN_DATABASE);
    bounded(
        connection.operation_timeout(),
        "ping",
        admin.run_command(doc! { "ping": 1 }),
    )
    .await?;
    Ok(())
}

/// Check MongoDB health with a `ping` command against the `admin` database
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConnection, check_health};
///
/// let healthy = check_health(&connection).await;
/// ```
pub async fn check_health(connection: &MongoConnection) -> bool {
    match ping_admin(connection).await {
        Ok(()) => {
            debug!("MongoDB ping successful");
            true
        }
        Err(e) => {
            warn!(error = %e, "MongoDB ping failed");
            false
        }
    }
}

/// Check MongoDB health with detailed status
///
/// Returns timing information and any error messages.
///
/// # Example
/// ```ignore
/// use database::mongodb::check_health_detailed;
///
/// let status = check_health_detailed(&connection).await;
/// if status.healthy {
///     println!("MongoDB healthy, latency: {}ms", status.response_time_ms);
/// } else {
///     println!("MongoDB unhealthy: {:?}", status.message);
/// }
/// ```
pub async fn check_health_detailed(connection: &MongoConnection) -> HealthStatus {
    let start = Instant::now();
    let result = ping_admin(connection).await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(()) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms,
        },
        Err(e) => {
            warn!(error = %e, "MongoDB ping failed");
            HealthStatus {
                healthy: false,
                message: Some(e.to_string()),
                response_time_ms,
            }
        }
    }
}
