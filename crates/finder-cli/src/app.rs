//! Command dispatch: each subcommand maps to one store operation.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use finder_core::{
  storage::Storage,
  store::CommunicationStore,
  thread::{NewMessage, Sender, Status, StatusUpdate},
  timestamp,
};
use serde_json::json;

use crate::render;

// ─── Commands ─────────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
  /// Print the dataset, or a single thread.
  Show {
    /// Thread id to show instead of the whole dataset.
    #[arg(long)]
    id: Option<String>,
  },

  /// Print the number of pending invites.
  Pending,

  /// Set the status of an invite.
  SetStatus { id: String, status: Status },

  /// Record a status event on a thread, optionally followed by one message.
  StatusUpdate {
    id: String,

    #[arg(long)]
    status: Option<Status>,

    #[arg(long)]
    notes: Option<String>,

    #[arg(long)]
    interview_time: Option<String>,

    #[arg(long)]
    timezone: Option<String>,

    #[arg(long)]
    hired_type: Option<String>,

    /// Event time (ISO 8601 date or date-time); defaults to now.
    #[arg(long, value_parser = timestamp::parse)]
    date: Option<DateTime<Utc>>,

    /// Message appended once the status update has been recorded.
    #[arg(long)]
    message: Option<String>,

    #[arg(long, default_value_t = Sender::Recruiter)]
    sender: Sender,
  },

  /// Append a message to a thread.
  Message {
    id: String,
    content: String,

    #[arg(long, default_value_t = Sender::Recruiter)]
    sender: Sender,
  },

  /// Poll storage and print the pending count whenever the dataset changes.
  Watch {
    /// Poll period; overrides `watch_interval_ms` from the config.
    #[arg(long)]
    interval_ms: Option<u64>,
  },
}

/// Whether a command found what it was asked to operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  Done,
  NotFound,
}

// ─── App ──────────────────────────────────────────────────────────────────────

pub struct App<S> {
  pub store: CommunicationStore<S>,
  /// Emit JSON instead of text.
  pub json:  bool,
}

impl<S: Storage> App<S> {
  pub fn new(store: CommunicationStore<S>, json: bool) -> Self { Self { store, json } }

  /// Run a one-shot command. `watch` is driven by the caller.
  pub fn execute(&self, command: Command, out: &mut impl Write) -> Result<Outcome> {
    match command {
      Command::Show { id: None } => {
        let data = self.store.get_communication_data()?;
        if self.json {
          writeln!(out, "{}", serde_json::to_string_pretty(&data)?)?;
        } else {
          write!(out, "{}", render::dataset(&data))?;
        }
        Ok(Outcome::Done)
      }

      Command::Show { id: Some(id) } => {
        let Some((collection, thread)) = self.store.find_thread(&id)? else {
          return self.not_found(out, &id);
        };
        if self.json {
          let value = json!({ "collection": collection, "thread": thread });
          writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        } else {
          write!(out, "{}", render::thread_detail(collection, &thread))?;
        }
        Ok(Outcome::Done)
      }

      Command::Pending => {
        let count = self.store.get_pending_invites_count()?;
        self.report_count(out, count)?;
        Ok(Outcome::Done)
      }

      Command::SetStatus { id, status } => {
        if !self.store.update_invite_status(&id, status)? {
          return self.not_found(out, &id);
        }
        self.confirm(out, &id, &format!("status set to {status}"))
      }

      Command::StatusUpdate {
        id,
        status,
        notes,
        interview_time,
        timezone,
        hired_type,
        date,
        message,
        sender,
      } => {
        let update = StatusUpdate { status, date, notes, interview_time, timezone, hired_type };
        if !self.store.add_status_update(&id, update)? {
          return self.not_found(out, &id);
        }
        // The message is a separate, single append after the merge.
        if let Some(content) = message {
          self
            .store
            .add_message(&id, NewMessage::new(sender, content))
            .with_context(|| format!("appending message to {id}"))?;
        }
        self.confirm(out, &id, "status update recorded")
      }

      Command::Message { id, content, sender } => {
        if !self.store.add_message(&id, NewMessage::new(sender, content))? {
          return self.not_found(out, &id);
        }
        self.confirm(out, &id, "message added")
      }

      Command::Watch { .. } => anyhow::bail!("watch is not a one-shot command"),
    }
  }

  /// Print the pending count in the selected format.
  pub fn report_count(&self, out: &mut impl Write, count: usize) -> Result<()> {
    if self.json {
      writeln!(out, "{}", json!({ "pendingInvites": count }))?;
    } else {
      writeln!(out, "{count} pending invite(s)")?;
    }
    Ok(())
  }

  fn confirm(&self, out: &mut impl Write, id: &str, what: &str) -> Result<Outcome> {
    if self.json {
      writeln!(out, "{}", json!({ "id": id, "ok": true }))?;
    } else {
      writeln!(out, "{id}: {what}")?;
    }
    Ok(Outcome::Done)
  }

  fn not_found(&self, out: &mut impl Write, id: &str) -> Result<Outcome> {
    if self.json {
      writeln!(out, "{}", json!({ "id": id, "ok": false }))?;
    } else {
      writeln!(out, "{id}: no such thread")?;
    }
    Ok(Outcome::NotFound)
  }
}

#[cfg(test)]
mod tests {
  use finder_core::storage::MemoryStorage;

  use super::*;

  fn app(json: bool) -> App<MemoryStorage> {
    App::new(CommunicationStore::new(MemoryStorage::new()), json)
  }

  fn run(app: &App<MemoryStorage>, command: Command) -> (Outcome, String) {
    let mut out = Vec::new();
    let outcome = app.execute(command, &mut out).unwrap();
    (outcome, String::from_utf8(out).unwrap())
  }

  #[test]
  fn pending_reports_seed_count() {
    let (outcome, text) = run(&app(false), Command::Pending);
    assert_eq!(outcome, Outcome::Done);
    assert_eq!(text, "2 pending invite(s)\n");
  }

  #[test]
  fn set_status_then_pending_in_json() {
    let a = app(true);
    let (outcome, _) = run(
      &a,
      Command::SetStatus { id: "inv1".into(), status: Status::Accepted },
    );
    assert_eq!(outcome, Outcome::Done);

    let (_, text) = run(&a, Command::Pending);
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["pendingInvites"], 1);
  }

  #[test]
  fn unknown_thread_is_not_found() {
    let a = app(false);
    let (outcome, text) = run(
      &a,
      Command::Message {
        id:      "ghost".into(),
        content: "hello".into(),
        sender:  Sender::Faculty,
      },
    );
    assert_eq!(outcome, Outcome::NotFound);
    assert_eq!(text, "ghost: no such thread\n");
  }

  #[test]
  fn status_update_with_message_appends_exactly_one() {
    let a = app(false);
    let before = a.store.find_thread("inv2").unwrap().unwrap().1.messages.len();

    let (outcome, _) = run(
      &a,
      Command::StatusUpdate {
        id:             "inv2".into(),
        status:         Some(Status::Hired),
        notes:          None,
        interview_time: None,
        timezone:       None,
        hired_type:     Some("tenure_track".into()),
        date:           None,
        message:        Some("Congratulations!".into()),
        sender:         Sender::Recruiter,
      },
    );
    assert_eq!(outcome, Outcome::Done);

    let (_, inv2) = a.store.find_thread("inv2").unwrap().unwrap();
    assert_eq!(inv2.status, Status::Hired);
    assert_eq!(inv2.messages.len(), before + 1);
    assert_eq!(inv2.messages.last().unwrap().content, "Congratulations!");
  }

  #[test]
  fn status_update_on_missing_thread_adds_no_message() {
    let a = app(false);
    a.store.get_communication_data().unwrap();
    let before = a.store.read_raw().unwrap();

    let (outcome, _) = run(
      &a,
      Command::StatusUpdate {
        id:             "ghost".into(),
        status:         Some(Status::Hired),
        notes:          None,
        interview_time: None,
        timezone:       None,
        hired_type:     None,
        date:           None,
        message:        Some("never sent".into()),
        sender:         Sender::Recruiter,
      },
    );
    assert_eq!(outcome, Outcome::NotFound);
    assert_eq!(a.store.read_raw().unwrap(), before);
  }

  #[test]
  fn show_single_thread_in_json_names_collection() {
    let (_, text) = run(&app(true), Command::Show { id: Some("sent1".into()) });
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["collection"], "sent");
    assert_eq!(value["thread"]["facultyId"], "fac-201");
  }
}
