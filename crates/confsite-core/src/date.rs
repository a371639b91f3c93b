//! Important dates (deadlines, milestones) and their chronological ordering.
//!
//! Dates are stored as the text the organisers typed. Ordering parses that
//! text on read; entries that cannot be parsed keep the position they had in
//! insertion order while the parsable ones are sorted around them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  RecordId, Result,
  validate::{Validate, merge_required, require, require_if_present},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportantDate {
  pub id:           RecordId,
  /// ISO-like date text, e.g. `2026-12-12` or `12th December, 2026`.
  pub date:         String,
  pub description:  String,
  pub is_highlight: bool,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewImportantDate {
  pub date:         String,
  pub description:  String,
  #[serde(default)]
  pub is_highlight: bool,
}

impl Validate for NewImportantDate {
  fn validate(&self) -> Result<()> {
    require("date", &self.date)?;
    require("description", &self.description)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImportantDatePatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_highlight: Option<bool>,
}

impl Validate for ImportantDatePatch {
  fn validate(&self) -> Result<()> {
    require_if_present("date", self.date.as_ref())?;
    require_if_present("description", self.description.as_ref())
  }
}

impl ImportantDate {
  pub fn apply(&mut self, patch: ImportantDatePatch, now: DateTime<Utc>) {
    merge_required(&mut self.date, patch.date);
    merge_required(&mut self.description, patch.description);
    if let Some(h) = patch.is_highlight {
      self.is_highlight = h;
    }
    self.updated_at = now;
  }

  pub fn parsed_date(&self) -> Option<NaiveDate> { parse_date_text(&self.date) }
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

const HUMAN_FORMATS: &[&str] = &["%d %B %Y", "%B %d %Y", "%d %b %Y", "%b %d %Y"];

/// Parse the handful of date spellings organisers actually use.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
  let text = text.trim();
  if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
    return Some(d);
  }
  if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
    return Some(dt.date_naive());
  }

  // "12th December, 2026" -> "12 December 2026"
  let cleaned = text
    .replace(',', " ")
    .split_whitespace()
    .map(strip_ordinal)
    .collect::<Vec<_>>()
    .join(" ");

  HUMAN_FORMATS
    .iter()
    .find_map(|fmt| NaiveDate::parse_from_str(&cleaned, fmt).ok())
}

fn strip_ordinal(token: &str) -> &str {
  for suffix in ["st", "nd", "rd", "th"] {
    if let Some(num) = token.strip_suffix(suffix)
      && !num.is_empty()
      && num.chars().all(|c| c.is_ascii_digit())
    {
      return num;
    }
  }
  token
}

// ─── Ordering ────────────────────────────────────────────────────────────────

/// Sort `dates` chronologically in place.
///
/// `dates` must arrive in insertion order. Parsable entries are stably sorted
/// by their calendar date and written back into the slots parsable entries
/// occupied; unparsable entries never move.
pub fn sort_chronologically(dates: &mut [ImportantDate]) {
  let slots: Vec<usize> = dates
    .iter()
    .enumerate()
    .filter(|(_, d)| d.parsed_date().is_some())
    .map(|(i, _)| i)
    .collect();

  let mut keyed: Vec<(NaiveDate, ImportantDate)> = slots
    .iter()
    .filter_map(|&i| dates[i].parsed_date().map(|p| (p, dates[i].clone())))
    .collect();
  keyed.sort_by_key(|(p, _)| *p);

  for (slot, (_, date)) in slots.into_iter().zip(keyed) {
    dates[slot] = date;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(id: RecordId, text: &str) -> ImportantDate {
    let now = Utc::now();
    ImportantDate {
      id,
      date: text.into(),
      description: format!("milestone {id}"),
      is_highlight: false,
      created_at: now,
      updated_at: now,
    }
  }

  fn ids(dates: &[ImportantDate]) -> Vec<RecordId> { dates.iter().map(|d| d.id).collect() }

  #[test]
  fn parses_common_spellings() {
    let expected = NaiveDate::from_ymd_opt(2026, 12, 12).unwrap();
    assert_eq!(parse_date_text("2026-12-12"), Some(expected));
    assert_eq!(parse_date_text("2026-12-12T09:00:00Z"), Some(expected));
    assert_eq!(parse_date_text("12th December, 2026"), Some(expected));
    assert_eq!(parse_date_text("December 12, 2026"), Some(expected));
    assert_eq!(parse_date_text("12 Dec 2026"), Some(expected));
    assert_eq!(parse_date_text("TBA"), None);
    assert_eq!(parse_date_text(""), None);
  }

  #[test]
  fn sorts_parsable_dates_ascending() {
    let mut dates = vec![date(1, "2026-12-01"), date(2, "2026-09-15"), date(3, "2026-10-30")];
    sort_chronologically(&mut dates);
    assert_eq!(ids(&dates), vec![2, 3, 1]);
  }

  #[test]
  fn unparsable_dates_keep_their_position() {
    let mut dates = vec![
      date(1, "2026-12-01"),
      date(2, "To be announced"),
      date(3, "2026-09-15"),
      date(4, "2026-10-30"),
    ];
    sort_chronologically(&mut dates);
    assert_eq!(ids(&dates), vec![3, 2, 4, 1]);
  }

  #[test]
  fn equal_dates_keep_insertion_order() {
    let mut dates = vec![date(1, "2026-12-01"), date(2, "1st December 2026"), date(3, "2026-01-01")];
    sort_chronologically(&mut dates);
    assert_eq!(ids(&dates), vec![3, 1, 2]);
  }

  #[test]
  fn highlight_defaults_to_false() {
    let d: NewImportantDate =
      serde_json::from_str(r#"{"date":"2026-12-12","description":"Paper Submission"}"#).unwrap();
    assert!(!d.is_highlight);
  }
}
