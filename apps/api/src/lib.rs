//! # Cardfolio API
//!
//! Versioned HTTP surface for the Cardfolio catalog.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cardfolio API                                   │
//! │                                                                         │
//! │  Client ───► HTTP (8000) ───► Route Handlers ───► cardfolio-db         │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │                               ImageStorage                              │
//! │                          (local / supabase / minio)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Endpoints
//!
//! | Method | Path                                    | Purpose              |
//! |--------|-----------------------------------------|----------------------|
//! | GET    | /api/v1/products/search                 | full-text search     |
//! | GET    | /api/v1/products                        | paginated listing    |
//! | POST   | /api/v1/products                        | create               |
//! | GET    | /api/v1/products/{id}                   | fetch one            |
//! | PUT    | /api/v1/products/{id}                   | partial update       |
//! | DELETE | /api/v1/products/{id}                   | delete (cascades)    |
//! | POST   | /api/v1/products/{id}/aliases           | attach search alias  |
//! | DELETE | /api/v1/products/{id}/aliases/{alias_id}| remove search alias  |
//! | GET    | /health                                 | liveness             |
//!
//! ## Configuration
//! Environment variables, read once at startup:
//! - `HTTP_PORT` - listen port (default: 8000)
//! - `DATABASE_PATH` - SQLite database file (default: ./data/cardfolio.db)
//! - `REQUEST_TIMEOUT_SECS` - per-request timeout (default: 30)
//! - `STORAGE_BACKEND` - local | supabase | minio (default: local)
//! - `STORAGE_BASE_PATH` / `STORAGE_BASE_URL` - local backend parameters
//! - `SUPABASE_URL` / `SUPABASE_ANON_KEY` / `SUPABASE_BUCKET` - supabase
//!   parameters (url and key are required when selected)
//! - `MINIO_ENDPOINT` / `MINIO_BUCKET` - minio parameters

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
pub mod storage;

// Re-exports
pub use config::{ApiConfig, ConfigError, StorageConfig};
pub use error::ApiError;
pub use state::AppState;
pub use storage::{ImageStorage, StorageError};
