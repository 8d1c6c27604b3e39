//! Sample content written to storage on first-ever access.

use crate::{Result, thread::Dataset};

/// The seed dataset in its persisted JSON form.
pub const SEED: &str = r#"{
  "invites": [
    {
      "id": "inv1",
      "facultyId": "fac-101",
      "facultyName": "Dr. Amelia Hart",
      "facultyEmail": "amelia.hart@northfield.edu",
      "jobTitle": "Assistant Professor of Computer Science",
      "status": "pending",
      "date": "2024-01-15T10:00:00Z",
      "messages": [
        {
          "id": "msg-inv1-1",
          "sender": "faculty",
          "content": "I would like to apply for the Assistant Professor position.",
          "timestamp": "2024-01-15T10:00:00Z"
        }
      ]
    },
    {
      "id": "inv2",
      "facultyId": "fac-102",
      "facultyName": "Dr. Rafael Ortiz",
      "facultyEmail": "r.ortiz@lakeside.edu",
      "jobTitle": "Associate Professor of Mathematics",
      "status": "interview",
      "date": "2024-01-10T14:30:00Z",
      "lastUpdate": {
        "status": "interview",
        "date": "2024-01-12T09:00:00Z",
        "notes": "Panel interview with the hiring committee.",
        "interviewTime": "2024-01-20T15:00",
        "timezone": "America/Chicago"
      },
      "messages": [
        {
          "id": "msg-inv2-1",
          "sender": "faculty",
          "content": "Please find my application attached.",
          "timestamp": "2024-01-10T14:30:00Z"
        },
        {
          "id": "msg-inv2-2",
          "sender": "recruiter",
          "content": "We would like to invite you to an interview.",
          "timestamp": "2024-01-12T09:00:00Z",
          "isSystem": true
        }
      ]
    },
    {
      "id": "inv3",
      "facultyId": "fac-103",
      "facultyName": "Dr. Mei Chen",
      "facultyEmail": "mei.chen@riverview.edu",
      "jobTitle": "Lecturer in Physics",
      "status": "pending",
      "date": "2024-01-18T08:15:00Z",
      "messages": []
    }
  ],
  "sent": [
    {
      "id": "sent1",
      "facultyId": "fac-201",
      "facultyName": "Dr. Samuel Okafor",
      "facultyEmail": "s.okafor@hillcrest.edu",
      "jobTitle": "Professor of Chemical Engineering",
      "status": "accepted",
      "date": "2024-01-05T11:00:00Z",
      "lastUpdate": {
        "status": "accepted",
        "date": "2024-01-07T16:45:00Z"
      },
      "messages": [
        {
          "id": "msg-sent1-1",
          "sender": "recruiter",
          "content": "We think you would be a great fit for our department.",
          "timestamp": "2024-01-05T11:00:00Z"
        },
        {
          "id": "msg-sent1-2",
          "sender": "faculty",
          "content": "Thank you, I am interested.",
          "timestamp": "2024-01-07T16:45:00Z"
        }
      ]
    },
    {
      "id": "sent2",
      "facultyId": "fac-202",
      "facultyName": "Dr. Laura Bennett",
      "facultyEmail": "laura.bennett@eastgate.edu",
      "jobTitle": "Assistant Professor of Economics",
      "status": "pending",
      "date": "2024-01-19T13:20:00Z",
      "messages": [
        {
          "id": "msg-sent2-1",
          "sender": "recruiter",
          "content": "Our economics department is hiring; are you open to a conversation?",
          "timestamp": "2024-01-19T13:20:00Z"
        }
      ]
    }
  ]
}"#;

/// Parse [`SEED`] into a [`Dataset`].
pub fn seed_dataset() -> Result<Dataset> { Ok(serde_json::from_str(SEED)?) }

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;
  use crate::thread::Status;

  #[test]
  fn seed_parses() {
    let data = seed_dataset().unwrap();
    assert_eq!(data.invites.len(), 3);
    assert_eq!(data.sent.len(), 2);
    assert_eq!(data.pending_invites(), 2);
  }

  #[test]
  fn seed_ids_are_unique_across_collections() {
    let data = seed_dataset().unwrap();
    let ids: HashSet<&str> = data
      .invites
      .iter()
      .chain(data.sent.iter())
      .map(|t| t.id.as_str())
      .collect();
    assert_eq!(ids.len(), data.invites.len() + data.sent.len());
  }

  #[test]
  fn seed_inv1_is_pending() {
    let data = seed_dataset().unwrap();
    let (_, inv1) = data.find("inv1").unwrap();
    assert_eq!(inv1.status, Status::Pending);
  }
}
