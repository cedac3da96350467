//! # Repository Module
//!
//! Database repository implementations for the Cardfolio catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  HTTP Handler                                                           │
//! │       │                                                                 │
//! │       │  db.products().search(&query)                                   │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── search(&self, params)   FTS5 match + filters + pagination          │
//! │  ├── list(&self, params)                                                │
//! │  ├── get_by_id(&self, id)                                               │
//! │  ├── insert(&self, product)                                             │
//! │  ├── update(&self, id, patch)                                           │
//! │  └── delete(&self, id)       cascades to owned aliases                  │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                         │
//! │  • SQL is isolated in one place                                         │
//! │  • Condition composition and offset/limit live next to the queries      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product CRUD and full-text search
//! - [`alias::AliasRepository`] - Search alias management

pub mod alias;
pub mod product;

use uuid::Uuid;

/// Generates a new entity identifier.
///
/// UUID v4: globally unique without coordination, assigned exactly once at
/// insert time.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
