//! Storage core for the todo service.
//!
//! # Overview
//! Owns everything below the HTTP layer: the `Todo` entity and its request
//! payloads, the PostgreSQL connection pool, the embedded schema migration
//! and the `TodoStore` trait with its `PgTodoStore` implementation.
//!
//! # Design
//! - The database is the only owner of todo state. No component keeps rows
//!   in memory between requests.
//! - Each store operation is a single statement; there are no transactions.
//! - `StoreError` separates caller mistakes (`Validation`, `NotFound`) from
//!   infrastructure failures so the HTTP layer can pick a status code.
//! - The `openapi` feature derives `utoipa::ToSchema` on the payload types;
//!   `test-utils` exposes in-process stores for exercising the HTTP layer
//!   without a database.

pub mod config;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod pool;
pub mod store;
pub mod types;

pub use config::DbConfig;
pub use error::{ConfigError, StoreError};
pub use store::{PgTodoStore, TodoStore};
pub use types::{CreateTodo, NewTodo, Todo, UpdateTodo};
