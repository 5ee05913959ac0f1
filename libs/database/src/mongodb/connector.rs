use mongodb::{Client, Database, options::ClientOptions};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, error, info};

use super::{MongoConfig, OPERATION_TIMEOUT_SECS};
use crate::common::{DatabaseError, DatabaseResult};

/// Observable lifecycle state of a [`MongoConnection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Client initialized; storage operations are attempted.
    Usable,
    /// Client initialization failed at start-up; storage operations are rejected.
    Unusable,
    /// `close()` has run. Terminal.
    Closed,
}

enum Handle {
    Usable { client: Client, database: Database },
    Unusable { reason: String },
}

struct Inner {
    handle: Handle,
    database_name: String,
    operation_timeout: Duration,
    closed: AtomicBool,
}

/// The process-wide pooled MongoDB handle.
///
/// Built once during start-up with [`MongoConnection::open`] and shared by cloning
/// (the clone shares the same pool). The handle itself never changes after
/// construction; only the closed flag flips, exactly once.
#[derive(Clone)]
pub struct MongoConnection {
    inner: Arc<Inner>,
}

impl MongoConnection {
    /// Open a pooled client for `config`.
    ///
    /// Never fails: a malformed connection string or an options error leaves the
    /// connection in [`ConnectionState::Unusable`] and logs the cause, so the
    /// process can still start and report the failure through its health route.
    /// The driver connects lazily, so an unreachable host is only noticed by
    /// `ping()` or the first storage operation.
    ///
    /// # Example
    /// ```ignore
    /// use database::mongodb::{MongoConfig, MongoConnection};
    ///
    /// let config = MongoConfig::with_database("mongodb://localhost:27017", "casacore_db");
    /// let connection = MongoConnection::open(&config).await;
    /// ```
    pub async fn open(config: &MongoConfig) -> Self {
        info!(
            url = %config.redacted_url(),
            database = %config.database,
            "Initializing MongoDB client"
        );

        let handle = match build_client(config).await {
            Ok(client) => {
                let database = client.database(&config.database);
                info!(
                    "MongoDB client initialized, pointing to '{}'",
                    config.database
                );
                Handle::Usable { client, database }
            }
            Err(e) => {
                error!(
                    error = %e,
                    "Failed to initialize MongoDB client; storage operations will be rejected"
                );
                Handle::Unusable {
                    reason: e.to_string(),
                }
            }
        };

        Self::from_handle(
            handle,
            &config.database,
            Duration::from_secs(config.operation_timeout_secs),
        )
    }

    /// Wrap an already-built client, with the default operation timeout.
    pub fn from_client(client: Client, database_name: &str) -> Self {
        let database = client.database(database_name);
        Self::from_handle(
            Handle::Usable { client, database },
            database_name,
            Duration::from_secs(OPERATION_TIMEOUT_SECS),
        )
    }

    /// A connection that rejects every storage operation with `reason`.
    pub fn unusable(database_name: &str, reason: impl Into<String>) -> Self {
        Self::from_handle(
            Handle::Unusable {
                reason: reason.into(),
            },
            database_name,
            Duration::from_secs(OPERATION_TIMEOUT_SECS),
        )
    }

    fn from_handle(handle: Handle, database_name: &str, operation_timeout: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                handle,
                database_name: database_name.to_string(),
                operation_timeout,
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        if self.inner.closed.load(Ordering::Acquire) {
            return ConnectionState::Closed;
        }
        match self.inner.handle {
            Handle::Usable { .. } => ConnectionState::Usable,
            Handle::Unusable { .. } => ConnectionState::Unusable,
        }
    }

    /// Name of the target database.
    pub fn database_name(&self) -> &str {
        &self.inner.database_name
    }

    /// Upper bound applied to every round-trip made through this connection.
    pub fn operation_timeout(&self) -> Duration {
        self.inner.operation_timeout
    }

    /// The target database handle. Pure read; performs no I/O.
    pub fn database(&self) -> DatabaseResult<Database> {
        self.usable().map(|(_, database)| database.clone())
    }

    pub(crate) fn client(&self) -> DatabaseResult<&Client> {
        self.usable().map(|(client, _)| client)
    }

    fn usable(&self) -> DatabaseResult<(&Client, &Database)> {
        if self.inner.closed.load(Ordering::Acquire) {
            return Err(DatabaseError::Closed);
        }
        match &self.inner.handle {
            Handle::Usable { client, database } => Ok((client, database)),
            Handle::Unusable { reason } => Err(DatabaseError::Unavailable(reason.clone())),
        }
    }

    /// Liveness probe against the `admin` database.
    ///
    /// Returns `false` on any failure (unusable, closed, I/O error or timeout)
    /// and logs the cause instead of returning it.
    pub async fn ping(&self) -> bool {
        super::health::check_health(self).await
    }

    /// Release every pooled connection.
    ///
    /// Idempotent: only the first call does any work, later calls and calls on an
    /// unusable connection are no-ops.
    pub async fn close(&self) {
        if self.inner.closed.swap(true, Ordering::AcqRel) {
            debug!("MongoDB connection already closed");
            return;
        }

        match &self.inner.handle {
            Handle::Usable { client, .. } => {
                client.clone().shutdown().await;
                info!("MongoDB connection closed");
            }
            Handle::Unusable { .. } => {
                debug!("MongoDB connection was never usable, nothing to release");
            }
        }
    }
}

impl fmt::Debug for MongoConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoConnection")
            .field("database", &self.inner.database_name)
            .field("state", &self.state())
            .finish()
    }
}

async fn build_client(config: &MongoConfig) -> DatabaseResult<Client> {
    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    Ok(Client::with_options(options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mongodb::check_health_detailed;
    use std::time::Instant;
    use tokio::net::TcpListener;

    /// Accepts connections and never writes a byte back
    async fn silent_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("mongodb://{}", addr)
    }

    #[tokio::test]
    async fn test_open_malformed_url_is_unusable() {
        let config = MongoConfig::with_database("definitely-not-a-mongo-url", "test");
        let connection = MongoConnection::open(&config).await;

        assert_eq!(connection.state(), ConnectionState::Unusable);
        assert_eq!(connection.database_name(), "test");
        assert!(matches!(
            connection.database(),
            Err(DatabaseError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_ping_unusable_returns_false() {
        let connection = MongoConnection::unusable("test", "no client");
        assert!(!connection.ping().await);
    }

    #[tokio::test]
    async fn test_open_valid_url_is_usable_without_io() {
        let config = MongoConfig::with_database("mongodb://127.0.0.1:27017", "casacore_db");
        let connection = MongoConnection::open(&config).await;

        assert_eq!(connection.state(), ConnectionState::Usable);
        let db = connection.database().unwrap();
        assert_eq!(db.name(), "casacore_db");

        connection.close().await;
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let config = MongoConfig::with_database("mongodb://127.0.0.1:27017", "test");
        let connection = MongoConnection::open(&config).await;

        connection.close().await;
        connection.close().await;

        assert_eq!(connection.state(), ConnectionState::Closed);
        assert!(matches!(connection.database(), Err(DatabaseError::Closed)));
        assert!(!connection.ping().await);
    }

    #[tokio::test]
    async fn test_close_unusable_is_noop() {
        let connection = MongoConnection::unusable("test", "bad uri");
        connection.close().await;
        assert_eq!(connection.state(), ConnectionState::Closed);
    }

    #[tokio::test]
    async fn test_clones_share_lifecycle() {
        let config = MongoConfig::with_database("mongodb://127.0.0.1:27017", "test");
        let connection = MongoConnection::open(&config).await;
        let shared = connection.clone();

        connection.close().await;

        assert_eq!(shared.state(), ConnectionState::Closed);
    }

    #[tokio::test]
    async fn test_ping_unreachable_host_returns_false() {
        let mut config = MongoConfig::with_database("mongodb://127.0.0.1:1", "test");
        config.server_selection_timeout_secs = 1;
        config.connect_timeout_secs = 1;
        config.min_pool_size = 0;

        let connection = MongoConnection::open(&config).await;
        assert_eq!(connection.state(), ConnectionState::Usable);
        assert!(!connection.ping().await);
    }

    #[tokio::test]
    async fn test_ping_silent_server_times_out() {
        let mut config = MongoConfig::with_database(silent_server().await, "test");
        config.connect_timeout_secs = 60;
        config.server_selection_timeout_secs = 60;
        config.operation_timeout_secs = 1;
        config.min_pool_size = 0;

        let connection = MongoConnection::open(&config).await;
        assert_eq!(connection.operation_timeout(), Duration::from_secs(1));

        let started = Instant::now();
        assert!(!connection.ping().await);
        assert!(started.elapsed() < Duration::from_secs(10));

        let status = check_health_detailed(&connection).await;
        assert!(!status.healthy);
        assert!(status.message.unwrap_or_default().contains("timed out"));
    }

    #[test]
    fn test_default_operation_timeout() {
        let connection = MongoConnection::unusable("test", "bad uri");
        assert_eq!(
            connection.operation_timeout(),
            Duration::from_secs(OPERATION_TIMEOUT_SECS)
        );
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_ping_live_server() {
        let url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let connection = MongoConnection::open(&MongoConfig::new(url)).await;
        assert!(connection.ping().await);
        connection.close().await;
    }
}
