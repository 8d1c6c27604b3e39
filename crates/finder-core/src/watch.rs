//! Read refresh for dependents of a shared storage.
//!
//! [`DatasetWatcher`] notices when another writer has replaced the stored
//! dataset and hands back the fresh copy. It never merges edits.

use crate::{Result, storage::Storage, store::CommunicationStore, thread::Dataset};

/// Remembers the last stored dataset it has seen.
#[derive(Debug, Default)]
pub struct DatasetWatcher {
  last_seen: Option<String>,
  primed:    bool,
}

impl DatasetWatcher {
  pub fn new() -> Self { Self::default() }

  /// Re-read the stored dataset; returns it only if it changed since the
  /// previous poll. The first poll always reports the current dataset, which
  /// is empty when nothing has been stored yet.
  pub fn poll<S: Storage>(
    &mut self,
    store: &CommunicationStore<S>,
  ) -> Result<Option<Dataset>> {
    let raw = store.read_raw()?;
    if self.primed && raw == self.last_seen {
      return Ok(None);
    }

    let data = match &raw {
      Some(r) => serde_json::from_str(r)?,
      None => Dataset::default(),
    };
    tracing::debug!(key = store.key(), "stored dataset changed");
    self.last_seen = raw;
    self.primed = true;
    Ok(Some(data))
  }
}
