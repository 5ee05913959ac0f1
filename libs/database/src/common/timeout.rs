use std::future::IntoFuture;
use std::time::Duration;
use tracing::warn;

use super::{DatabaseError, DatabaseResult};

/// Run one store round-trip, giving up after `limit`.
///
/// The driver only bounds connection establishment and server selection, so a
/// server that accepts a command and never replies would otherwise stall the
/// caller forever.
///
/// # Example
/// ```ignore
/// let product = bounded(limit, "find_one", collection.find_one(filter)).await?;
/// ```
pub async fn bounded<F, T, E>(limit: Duration, operation: &'static str, round_trip: F) -> DatabaseResult<T>
where
    F: IntoFuture<Output = Result<T, E>>,
    E: Into<DatabaseError>,
{
    match tokio::time::timeout(limit, round_trip.into_future()).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => {
            warn!(operation, ?limit, "Database round-trip timed out");
            Err(DatabaseError::Timeout {
                operation,
                after: limit,
            })
        }
    }
}
