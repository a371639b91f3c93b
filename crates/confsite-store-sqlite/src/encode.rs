//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with fixed microsecond
//! precision, so lexical order matches chronological order. Enums are stored
//! as their variant text. Decoding failures surface as
//! [`rusqlite::Error::FromSqlConversionFailure`] so they can be raised from
//! inside a row-mapping closure.

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use confsite_core::{committee::CommitteeRole, settings::EventMode};
use rusqlite::{Row, types::Type};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// The current time at the precision the store persists.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Micros, true) }

pub fn dt_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
  let text: String = row.get(idx)?;
  DateTime::parse_from_rfc3339(&text)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

// ─── Enums ───────────────────────────────────────────────────────────────────

pub fn event_mode_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<EventMode> {
  let text: String = row.get(idx)?;
  EventMode::parse(&text)
    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub fn role_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<CommitteeRole> {
  let text: String = row.get(idx)?;
  CommitteeRole::parse(&text)
    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn timestamps_have_fixed_width() {
    let a = encode_dt(now());
    assert!(a.ends_with('Z'));
    // 2026-10-16T12:00:00.123456Z
    assert_eq!(a.len(), 27);
  }
}
