#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_required_any};

/// Database used when `DB_NAME` is not set.
pub const DEFAULT_DATABASE: &str = "casacore_db";

/// Pool and timeout bounds applied to every client.
pub const MIN_POOL_SIZE: u32 = 5;
pub const MAX_POOL_SIZE: u32 = 10;
pub const CONNECT_TIMEOUT_SECS: u64 = 30;
pub const SERVER_SELECTION_TIMEOUT_SECS: u64 = 10;
pub const OPERATION_TIMEOUT_SECS: u64 = 30;

/// MongoDB database configuration
///
/// This struct holds MongoDB connection settings.
/// It can be constructed manually or loaded from environment variables (with `config` feature).
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// // Manual construction, default database
/// let config = MongoConfig::new("mongodb://localhost:27017");
///
/// // With database name
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "mydb");
///
/// // From environment variables (requires `config` feature)
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// MongoDB connection URL (required)
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    /// Database name to use
    pub database: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Maximum number of connections in the pool
    pub max_pool_size: u32,

    /// Minimum number of connections in the pool
    pub min_pool_size: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,

    /// Upper bound for a single round-trip (command sent, reply received), in seconds
    pub operation_timeout_secs: u64,
}

impl MongoConfig {
    /// Create a new MongoConfig pointing at the default `casacore_db` database
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_database(url, DEFAULT_DATABASE)
    }

    /// Create a MongoConfig with a specific database name
    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            app_name: None,
            max_pool_size: MAX_POOL_SIZE,
            min_pool_size: MIN_POOL_SIZE,
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            server_selection_timeout_secs: SERVER_SELECTION_TIMEOUT_SECS,
            operation_timeout_secs: OPERATION_TIMEOUT_SECS,
        }
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// The URL with any `user:password@` section masked, safe for logs.
    pub fn redacted_url(&self) -> String {
        match (self.url.find("://"), self.url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                format!("{}://***{}", &self.url[..scheme_end], &self.url[at..])
            }
            _ => self.url.clone(),
        }
    }

    /// Get the database name
    pub fn database(&self) -> &str {
        &self.database
    }
}

/// Load MongoConfig from environment variables
///
/// Environment variables:
/// - `DATABASE_URL` or `MONGODB_URL` (required) - MongoDB connection string
/// - `DB_NAME` (optional, default: `casacore_db`) - Database name
/// - `MONGODB_APP_NAME` (optional) - Application name for server logs
///
/// Pool bounds and timeouts are not configurable.
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_required_any(&["DATABASE_URL", "MONGODB_URL"])?;
        let database = env_or_default("DB_NAME", DEFAULT_DATABASE);

        let mut config = Self::with_database(url, database);
        config.app_name = std::env::var("MONGODB_APP_NAME").ok();

        Ok(config)
    }
}
