//! Core types and operations for the Faculty Finder communication store.
//!
//! This crate is deliberately free of database and CLI dependencies. Storage
//! backends implement [`storage::Storage`]; everything else is built on top of
//! [`store::CommunicationStore`].

pub mod error;
pub mod reconcile;
pub mod seed;
pub mod storage;
pub mod store;
pub mod thread;
pub mod timestamp;
pub mod watch;

pub use error::{Error, Result};
