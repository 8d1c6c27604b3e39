//! Status reconciliation: merging an incoming status event into a thread's
//! last known status.
//!
//! A follow-up annotation must never hide a previously recorded main status,
//! while a genuine transition between main statuses always takes effect.

use chrono::{DateTime, Utc};

use crate::thread::{LastUpdate, Status, StatusUpdate};

/// The outcome of reconciling one status event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
  /// The merged record to store as the thread's `last_update`.
  pub last_update: LastUpdate,
  /// The new top-level thread status, if it changes.
  pub status:      Option<Status>,
}

/// Compute the next `last_update` for a thread.
///
/// - `prev`: the thread's current `last_update`, if any.
/// - `current`: the thread's current top-level status.
/// - `now`: used as the event date when `update.date` is absent.
///
/// Optional fields of `update` override those of `prev` only when present.
pub fn reconcile(
  prev: Option<&LastUpdate>,
  current: Status,
  update: StatusUpdate,
  now: DateTime<Utc>,
) -> Reconciled {
  let (status, top_level) = match (update.status, prev.map(|p| p.status)) {
    (Some(incoming), _) if incoming.is_main() => (incoming, Some(incoming)),
    (_, Some(previous)) if previous.is_main() => (previous, None),
    (incoming, _) => (incoming.unwrap_or(current), None),
  };

  let last_update = LastUpdate {
    status,
    date: update.date.unwrap_or(now),
    notes: update.notes.or_else(|| prev.and_then(|p| p.notes.clone())),
    interview_time: update
      .interview_time
      .or_else(|| prev.and_then(|p| p.interview_time.clone())),
    timezone: update
      .timezone
      .or_else(|| prev.and_then(|p| p.timezone.clone())),
    hired_type: update
      .hired_type
      .or_else(|| prev.and_then(|p| p.hired_type.clone())),
  };

  Reconciled { last_update, status: top_level }
}
