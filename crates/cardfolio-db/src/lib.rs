//! # cardfolio-db: Database Layer for Cardfolio
//!
//! This crate provides database access for the Cardfolio catalog service.
//! It uses SQLite with FTS5 for storage and full-text search, via sqlx for
//! async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cardfolio Data Flow                               │
//! │                                                                         │
//! │  HTTP Handler (GET /api/v1/products/search)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   cardfolio-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │ (product.rs,  │    │  (embedded)  │   │   │
//! │  │   │               │    │  alias.rs)    │    │              │   │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo   │    │ 001_init.sql │   │   │
//! │  │   │ Connection    │    │ AliasRepo     │    │ 002_fts.sql  │   │   │
//! │  │   │ Management    │    │               │    │              │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (FTS5 virtual tables carry the search index)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, alias)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cardfolio_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/cardfolio.db")).await?;
//! let page = db.products().search(&query).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::alias::{AliasRepository, NewAlias};
pub use repository::product::{ProductList, ProductPatch, ProductRepository, ProductSearch};
pub use repository::generate_id;
