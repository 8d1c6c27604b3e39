//! Thread types: the persisted shape of invite and sent records.
//!
//! An invite and a sent record share the same shape; they differ only in
//! which collection of the [`Dataset`] they live in. Field names serialise in
//! camelCase to match the stored JSON layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ─── Status ──────────────────────────────────────────────────────────────────

/// The status of a thread or of a single status event.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Status {
  Pending,
  Accepted,
  Rejected,
  Interview,
  Hired,
  /// An annotation on top of a main status; never a primary state.
  FollowUp,
}

impl Status {
  /// Main statuses are authoritative and survive follow-up annotations.
  pub fn is_main(self) -> bool { !matches!(self, Self::FollowUp) }
}

/// Who authored a message.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sender {
  Recruiter,
  Faculty,
}

// ─── Messages ────────────────────────────────────────────────────────────────

/// One entry of a thread's message history. Messages are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
  pub id:        String,
  pub sender:    Sender,
  pub content:   String,
  #[serde(with = "crate::timestamp")]
  pub timestamp: DateTime<Utc>,
  /// Set on messages generated by the store itself rather than a person.
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub is_system: bool,
}

/// Input to [`crate::store::CommunicationStore::add_message`].
/// `id` and `timestamp` are always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewMessage {
  pub sender:    Sender,
  pub content:   String,
  #[serde(default)]
  pub is_system: bool,
}

impl NewMessage {
  pub fn new(sender: Sender, content: impl Into<String>) -> Self {
    Self { sender, content: content.into(), is_system: false }
  }

  /// A message authored by the system on the recruiter's behalf.
  pub fn system(content: impl Into<String>) -> Self {
    Self { sender: Sender::Recruiter, content: content.into(), is_system: true }
  }
}

// ─── Status events ───────────────────────────────────────────────────────────

/// The most recent status event recorded on a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastUpdate {
  pub status:         Status,
  #[serde(with = "crate::timestamp")]
  pub date:           DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes:          Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub interview_time: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timezone:       Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub hired_type:     Option<String>,
}

/// Input to [`crate::store::CommunicationStore::add_status_update`].
///
/// Every field is optional. Keys outside this set are rejected when
/// deserialising.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StatusUpdate {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status:         Option<Status>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    with = "crate::timestamp::option"
  )]
  pub date:           Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes:          Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub interview_time: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timezone:       Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub hired_type:     Option<String>,
}

impl StatusUpdate {
  /// An update carrying only a status.
  pub fn with_status(status: Status) -> Self {
    Self { status: Some(status), ..Self::default() }
  }
}

// ─── Thread ──────────────────────────────────────────────────────────────────

/// An invite or application record with its status and message history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
  /// Unique across both collections of the dataset.
  pub id:            String,
  pub faculty_id:    String,
  pub faculty_name:  String,
  pub faculty_email: String,
  pub job_title:     String,
  pub status:        Status,
  /// Creation time.
  #[serde(with = "crate::timestamp")]
  pub date:          DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last_update:   Option<LastUpdate>,
  /// Chronological; insertion order is never changed.
  #[serde(default)]
  pub messages:      Vec<Message>,
}

// ─── Dataset ─────────────────────────────────────────────────────────────────

/// Which collection of the dataset a thread lives in.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
  Invites,
  Sent,
}

/// The whole persisted unit; read and rewritten as one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
  #[serde(default)]
  pub invites: Vec<Thread>,
  #[serde(default)]
  pub sent:    Vec<Thread>,
}

impl Dataset {
  /// Number of invites whose top-level status is `pending`.
  pub fn pending_invites(&self) -> usize {
    self
      .invites
      .iter()
      .filter(|t| t.status == Status::Pending)
      .count()
  }

  /// Find a thread by id, searching `invites` and then `sent`.
  pub fn find(&self, id: &str) -> Option<(Collection, &Thread)> {
    self
      .invites
      .iter()
      .find(|t| t.id == id)
      .map(|t| (Collection::Invites, t))
      .or_else(|| {
        self
          .sent
          .iter()
          .find(|t| t.id == id)
          .map(|t| (Collection::Sent, t))
      })
  }

  /// Mutable variant of [`Dataset::find`] with the same search order.
  pub fn find_mut(&mut self, id: &str) -> Option<&mut Thread> {
    if let Some(pos) = self.invites.iter().position(|t| t.id == id) {
      return self.invites.get_mut(pos);
    }
    self.sent.iter_mut().find(|t| t.id == id)
  }

  /// Find a thread by id in `invites` only.
  pub fn find_invite_mut(&mut self, id: &str) -> Option<&mut Thread> {
    self.invites.iter_mut().find(|t| t.id == id)
  }
}
