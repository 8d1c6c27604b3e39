//! SQLite backend for the Faculty Finder communication store.
//!
//! Persists [`finder_core::storage::Storage`] items in a single SQLite file,
//! so a dataset survives across processes the way local storage survives
//! across page loads.

mod schema;
mod storage;

pub mod error;

pub use error::{Error, Result};
pub use storage::SqliteStorage;
