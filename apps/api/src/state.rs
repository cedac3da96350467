//! Shared application state.
//!
//! Built once during startup from validated configuration and handed to the
//! router; handlers receive it through axum's `State` extractor. There is no
//! other shared mutable in-process state - the connection pool inside
//! [`Database`] is the only thing requests contend for.

use cardfolio_db::Database;

use crate::config::ApiConfig;
use crate::storage::ImageStorage;

/// Shared application state.
pub struct AppState {
    /// Database handle (wraps the SQLite connection pool).
    pub db: Database,

    /// Image storage backend selected at startup.
    pub storage: ImageStorage,

    /// The loaded configuration.
    pub config: ApiConfig,
}
