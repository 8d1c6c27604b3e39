//! [`CommunicationStore`]: read-modify-write operations over the persisted
//! [`Dataset`].
//!
//! Every operation loads the whole dataset from storage, and every successful
//! mutation writes the whole dataset back. An operation that cannot find its
//! thread returns `false` and writes nothing. There is no coordination
//! between stores sharing a storage: the last writer wins.

use uuid::Uuid;

use crate::{
  Error, Result,
  reconcile::reconcile,
  seed::seed_dataset,
  storage::Storage,
  thread::{Collection, Dataset, Message, NewMessage, Status, StatusUpdate, Thread},
  timestamp,
};

/// The storage key the dataset lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "communicationData";

/// Text of the system message appended when an invite is decided.
pub fn decision_message(status: Status) -> Option<&'static str> {
  match status {
    Status::Accepted => Some("Recruiter has accepted your application."),
    Status::Rejected => Some("Recruiter has rejected your application."),
    _ => None,
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// The communication thread store over a [`Storage`] backend.
#[derive(Debug, Clone)]
pub struct CommunicationStore<S> {
  storage: S,
  key:     String,
}

impl<S: Storage> CommunicationStore<S> {
  /// A store keeping its dataset under [`DEFAULT_STORAGE_KEY`].
  pub fn new(storage: S) -> Self { Self::with_key(storage, DEFAULT_STORAGE_KEY) }

  /// A store keeping its dataset under `key`.
  pub fn with_key(storage: S, key: impl Into<String>) -> Self {
    Self { storage, key: key.into() }
  }

  pub fn key(&self) -> &str { &self.key }

  pub fn storage(&self) -> &S { &self.storage }

  /// The serialised dataset exactly as stored, without seeding.
  pub fn read_raw(&self) -> Result<Option<String>> {
    self.storage.get_item(&self.key).map_err(Error::storage)
  }

  fn save(&self, data: &Dataset) -> Result<()> {
    let raw = serde_json::to_string(data)?;
    self
      .storage
      .set_item(&self.key, &raw)
      .map_err(Error::storage)?;
    tracing::debug!(key = %self.key, bytes = raw.len(), "dataset written");
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// Return the full dataset, writing the seed dataset on first access.
  pub fn get_communication_data(&self) -> Result<Dataset> {
    match self.read_raw()? {
      Some(raw) => Ok(serde_json::from_str(&raw)?),
      None => {
        tracing::info!(key = %self.key, "no dataset in storage; seeding");
        let data = seed_dataset()?;
        self.save(&data)?;
        Ok(data)
      }
    }
  }

  /// Number of invites whose status is `pending`.
  pub fn get_pending_invites_count(&self) -> Result<usize> {
    Ok(self.get_communication_data()?.pending_invites())
  }

  /// Locate a thread in `invites` or `sent`, reporting which one holds it.
  pub fn find_thread(&self, thread_id: &str) -> Result<Option<(Collection, Thread)>> {
    let data = self.get_communication_data()?;
    Ok(data.find(thread_id).map(|(c, t)| (c, t.clone())))
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Set the status of an invite. Only `invites` is searched.
  ///
  /// Accepting or rejecting also appends one system message.
  pub fn update_invite_status(
    &self,
    thread_id: &str,
    new_status: Status,
  ) -> Result<bool> {
    let mut data = self.get_communication_data()?;
    let Some(invite) = data.find_invite_mut(thread_id) else {
      tracing::warn!(thread_id, "invite not found; status unchanged");
      return Ok(false);
    };

    invite.status = new_status;
    if let Some(text) = decision_message(new_status) {
      push_message(invite, NewMessage::system(text));
    }

    self.save(&data)?;
    tracing::debug!(thread_id, status = %new_status, "invite status updated");
    Ok(true)
  }

  /// Merge a status event into a thread's `last_update`.
  ///
  /// Searches `invites` then `sent`. Never appends a message; callers that
  /// want one follow up with [`CommunicationStore::add_message`].
  pub fn add_status_update(
    &self,
    thread_id: &str,
    update: StatusUpdate,
  ) -> Result<bool> {
    let mut data = self.get_communication_data()?;
    let Some(thread) = data.find_mut(thread_id) else {
      tracing::warn!(thread_id, "thread not found; status update dropped");
      return Ok(false);
    };

    let merged = reconcile(thread.last_update.as_ref(), thread.status, update, timestamp::now());
    if let Some(status) = merged.status {
      thread.status = status;
    }
    tracing::debug!(
      thread_id,
      status = %merged.last_update.status,
      "status update merged"
    );
    thread.last_update = Some(merged.last_update);

    self.save(&data)?;
    Ok(true)
  }

  /// Append a message to a thread. Searches `invites` then `sent`.
  pub fn add_message(&self, thread_id: &str, message: NewMessage) -> Result<bool> {
    let mut data = self.get_communication_data()?;
    let Some(thread) = data.find_mut(thread_id) else {
      tracing::warn!(thread_id, "thread not found; message dropped");
      return Ok(false);
    };

    push_message(thread, message);

    self.save(&data)?;
    tracing::debug!(thread_id, "message appended");
    Ok(true)
  }
}

fn push_message(thread: &mut Thread, message: NewMessage) {
  thread.messages.push(Message {
    id:        Uuid::new_v4().to_string(),
    sender:    message.sender,
    content:   message.content,
    timestamp: timestamp::now(),
    is_system: message.is_system,
  });
}
