//! Database module: models, schema and queries for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and API views
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: the shared `Storage` handle
//! - one file per table with its `impl Storage` queries

pub mod models;
pub mod payments;
pub mod portfolios;
pub mod schema;
pub mod sqlite;
pub mod templates;
pub mod users;

pub use models::{Payment, PaymentStatus, Portfolio, Template, User};
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, Storage};
