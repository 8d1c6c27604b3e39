//! Plain-text rendering of threads and datasets.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use finder_core::thread::{Collection, Dataset, LastUpdate, Thread};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

fn time(dt: DateTime<Utc>) -> String { dt.format(TIME_FORMAT).to_string() }

/// One line per thread: id, status, counterpart, posting.
pub fn thread_line(thread: &Thread) -> String {
  format!(
    "{:<10} {:<10} {} <{}> | {}",
    thread.id, thread.status, thread.faculty_name, thread.faculty_email, thread.job_title
  )
}

/// Both collections as two headed lists.
pub fn dataset(data: &Dataset) -> String {
  let mut out = String::new();
  for (title, threads) in [("Invites", &data.invites), ("Sent", &data.sent)] {
    let _ = writeln!(out, "{title} ({})", threads.len());
    for t in threads {
      let _ = writeln!(out, "  {}", thread_line(t));
    }
  }
  out
}

fn last_update(lu: &LastUpdate) -> String {
  let mut line = format!("{} at {}", lu.status, time(lu.date));
  if let Some(when) = &lu.interview_time {
    let _ = write!(line, ", interview {when}");
    if let Some(tz) = &lu.timezone {
      let _ = write!(line, " ({tz})");
    }
  }
  if let Some(kind) = &lu.hired_type {
    let _ = write!(line, ", {kind}");
  }
  if let Some(notes) = &lu.notes {
    let _ = write!(line, ": {notes}");
  }
  line
}

/// A thread with its status history and full message list.
pub fn thread_detail(collection: Collection, thread: &Thread) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "[{collection}] {}", thread_line(thread));
  let _ = writeln!(out, "  created {}", time(thread.date));
  if let Some(lu) = &thread.last_update {
    let _ = writeln!(out, "  last update: {}", last_update(lu));
  }
  for m in &thread.messages {
    let marker = if m.is_system { "*" } else { " " };
    let _ = writeln!(
      out,
      "  {marker}{} {:<9} {}",
      time(m.timestamp),
      m.sender,
      m.content
    );
  }
  out
}

#[cfg(test)]
mod tests {
  use finder_core::{seed::seed_dataset, thread::Status};

  use super::*;

  #[test]
  fn dataset_lists_both_collections() {
    let data = seed_dataset().unwrap();
    let text = dataset(&data);
    assert!(text.starts_with("Invites (3)\n"));
    assert!(text.contains("Sent (2)\n"));
    assert!(text.contains("inv1"));
    assert!(text.contains("sent2"));
  }

  #[test]
  fn detail_shows_interview_details_and_system_marker() {
    let data = seed_dataset().unwrap();
    let (collection, inv2) = data.find("inv2").unwrap();
    let text = thread_detail(collection, inv2);

    assert!(text.starts_with("[invites] inv2"));
    assert!(text.contains("interview 2024-01-20T15:00 (America/Chicago)"));
    assert!(text.contains("*2024-01-12 09:00 recruiter"));
  }

  #[test]
  fn line_shows_status_in_snake_case() {
    let data = seed_dataset().unwrap();
    let mut thread = data.invites[0].clone();
    thread.status = Status::FollowUp;
    assert!(thread_line(&thread).contains("follow_up"));
  }
}
