//! # cardfolio-core: Pure Domain Logic for Cardfolio
//!
//! This crate is the **heart** of the Cardfolio catalog service. It contains
//! the domain types, request shapes and validation rules as pure code with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cardfolio Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     HTTP API (apps/api)                         │   │
//! │  │    /products/search ── /products ── /products/{id}              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ cardfolio-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   price   │  │  schemas  │  │ validation│  │   │
//! │  │   │  Product  │  │   Price   │  │  Create/  │  │   rules   │  │   │
//! │  │   │   Alias   │  │  (cents)  │  │  Update   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 cardfolio-db (Database Layer)                   │   │
//! │  │           SQLite queries, FTS5, migrations, repositories        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductAlias, ProductPage)
//! - [`price`] - Price type with integer-cent arithmetic (no floating point!)
//! - [`schemas`] - Request shapes for create/update operations
//! - [`error`] - Validation error types
//! - [`validation`] - Field validation rules

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod price;
pub mod schemas;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use price::Price;
pub use schemas::{AliasCreate, ProductCreate, ProductUpdate};
pub use types::{Product, ProductAlias, ProductPage};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default card condition when a create request omits it.
///
/// "NM" is the grading abbreviation for Near Mint, the baseline condition
/// for catalog entries.
pub const DEFAULT_CONDITION: &str = "NM";

/// Default page size for search and listing.
pub const DEFAULT_PER_PAGE: i64 = 20;

/// Maximum page size for search and listing.
///
/// Keeps a single request from dragging an unbounded result set (and its
/// eagerly-loaded aliases) out of the database.
pub const MAX_PER_PAGE: i64 = 100;
