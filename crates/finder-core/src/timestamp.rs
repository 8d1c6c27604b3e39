//! Timestamp parsing and serde helpers for the persisted layout.
//!
//! Stored dates are ISO 8601 strings written by more than one kind of client,
//! so reading is lenient: full RFC 3339, a date-time without an offset
//! (taken as UTC), or a bare calendar date (midnight UTC). Writing always
//! produces UTC with millisecond precision, e.g. `2024-01-15T10:00:00.000Z`.

use chrono::{
  DateTime, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound as _, Utc,
};
use serde::{Deserialize, Deserializer, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("not an ISO 8601 date or date-time: {0:?}")]
pub struct ParseTimestampError(String);

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse any of the accepted ISO 8601 forms.
pub fn parse(s: &str) -> Result<DateTime<Utc>, ParseTimestampError> {
  let s = s.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.with_timezone(&Utc));
  }
  for fmt in NAIVE_FORMATS {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
      return Ok(naive.and_utc());
    }
  }
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .map(|naive| naive.and_utc())
    .ok_or_else(|| ParseTimestampError(s.to_owned()))
}

/// Render in the persisted form.
pub fn format(dt: &DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Millis, true) }

/// The current time at the precision that is persisted.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(3) }

pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, ser: S) -> Result<S::Ok, S::Error> {
  ser.serialize_str(&format(dt))
}

pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<DateTime<Utc>, D::Error> {
  let raw = String::deserialize(de)?;
  parse(&raw).map_err(serde::de::Error::custom)
}

/// The same helpers for optional fields.
pub mod option {
  use super::*;

  pub fn serialize<S: Serializer>(
    dt: &Option<DateTime<Utc>>,
    ser: S,
  ) -> Result<S::Ok, S::Error> {
    match dt {
      Some(dt) => ser.serialize_some(&format(dt)),
      None => ser.serialize_none(),
    }
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    de: D,
  ) -> Result<Option<DateTime<Utc>>, D::Error> {
    Option::<String>::deserialize(de)?
      .map(|raw| parse(&raw).map_err(serde::de::Error::custom))
      .transpose()
  }
}
