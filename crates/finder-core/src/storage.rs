//! The `Storage` trait, a string key-value seam standing in for browser
//! local storage, and an in-memory implementation.
//!
//! Durable backends (e.g. `finder-store-sqlite`) implement the same trait.
//! The [`CommunicationStore`](crate::store::CommunicationStore) depends on
//! this abstraction, not on any concrete backend.

use std::{
  collections::HashMap,
  convert::Infallible,
  sync::{Arc, Mutex, PoisonError},
};

/// A synchronous string key-value store.
///
/// Methods take `&self`; implementations serialise access internally so a
/// single storage can be shared by several stores.
pub trait Storage: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the value stored under `key`. Returns `None` if the key is absent.
  fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error>;

  /// Replace the value stored under `key`.
  fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

impl<S: Storage + ?Sized> Storage for &S {
  type Error = S::Error;

  fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
    (**self).get_item(key)
  }

  fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
    (**self).set_item(key, value)
  }
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
  type Error = S::Error;

  fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
    (**self).get_item(key)
  }

  fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
    (**self).set_item(key, value)
  }
}

// ─── MemoryStorage ───────────────────────────────────────────────────────────

/// A process-local storage, useful for testing.
#[derive(Debug, Default)]
pub struct MemoryStorage {
  items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
  pub fn new() -> Self { Self::default() }
}

impl Storage for MemoryStorage {
  type Error = Infallible;

  fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
    let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(items.get(key).cloned())
  }

  fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
    let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
    items.insert(key.to_owned(), value.to_owned());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_key_reads_as_none() {
    let s = MemoryStorage::new();
    assert_eq!(s.get_item("nothing").unwrap(), None);
  }

  #[test]
  fn set_replaces_previous_value() {
    let s = MemoryStorage::new();
    s.set_item("k", "one").unwrap();
    s.set_item("k", "two").unwrap();
    assert_eq!(s.get_item("k").unwrap().as_deref(), Some("two"));
  }

  #[test]
  fn shared_handles_see_the_same_items() {
    let s = Arc::new(MemoryStorage::new());
    let other = Arc::clone(&s);
    s.set_item("k", "v").unwrap();
    assert_eq!(other.get_item("k").unwrap().as_deref(), Some("v"));
  }
}
