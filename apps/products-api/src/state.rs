//! Application state management

use database::mongodb::MongoConnection;

/// Shared application state
///
/// The connection is opened once at start-up; clones share its pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub connection: MongoConnection,
}
