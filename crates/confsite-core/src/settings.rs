//! General event settings: a singleton record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::{
  Error, RecordId, Result,
  validate::{Validate, merge_optional, merge_required, require_if_present},
};

/// The settings table only ever holds this row.
pub const SETTINGS_ID: RecordId = 1;

pub const DEFAULT_EVENT_TITLE: &str = "International Conference 2026";
pub const DEFAULT_ORGANIZING_DEPT: &str = "Dept. of CSE";

/// How the event is attended.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsRefStr, EnumString,
)]
pub enum EventMode {
  #[default]
  Hybrid,
  Offline,
  Online,
}

impl EventMode {
  pub fn parse(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::UnknownEventMode(s.to_owned()))
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
  pub id:               RecordId,
  pub event_title:      String,
  pub event_subtitle:   Option<String>,
  /// Free text, e.g. "12–14 December 2026".
  pub event_dates:      String,
  pub event_location:   String,
  pub event_mode:       EventMode,
  pub publication_info: Option<String>,
  pub organizing_dept:  Option<String>,
  pub created_at:       DateTime<Utc>,
  pub updated_at:       DateTime<Utc>,
}

/// Partial update accepted by `PATCH /settings`. Every field is optional; the
/// same payload creates the row when none exists yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SettingsPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub event_title:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub event_subtitle:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub event_dates:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub event_location:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub event_mode:       Option<EventMode>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub publication_info: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub organizing_dept:  Option<String>,
}

impl Validate for SettingsPatch {
  fn validate(&self) -> Result<()> {
    require_if_present("eventTitle", self.event_title.as_ref())
  }
}

impl Settings {
  /// Build the singleton row from its column defaults plus `patch`.
  pub fn from_patch(patch: SettingsPatch, now: DateTime<Utc>) -> Self {
    let mut settings = Self {
      id:               SETTINGS_ID,
      event_title:      DEFAULT_EVENT_TITLE.to_owned(),
      event_subtitle:   None,
      event_dates:      String::new(),
      event_location:   String::new(),
      event_mode:       EventMode::default(),
      publication_info: None,
      organizing_dept:  Some(DEFAULT_ORGANIZING_DEPT.to_owned()),
      created_at:       now,
      updated_at:       now,
    };
    settings.apply(patch, now);
    settings
  }

  pub fn apply(&mut self, patch: SettingsPatch, now: DateTime<Utc>) {
    merge_required(&mut self.event_title, patch.event_title);
    merge_optional(&mut self.event_subtitle, patch.event_subtitle);
    merge_required(&mut self.event_dates, patch.event_dates);
    merge_required(&mut self.event_location, patch.event_location);
    if let Some(mode) = patch.event_mode {
      self.event_mode = mode;
    }
    merge_optional(&mut self.publication_info, patch.publication_info);
    merge_optional(&mut self.organizing_dept, patch.organizing_dept);
    self.updated_at = now;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_fill_missing_columns() {
    let now = Utc::now();
    let s = Settings::from_patch(
      SettingsPatch { event_location: Some("Kolkata".into()), ..Default::default() },
      now,
    );
    assert_eq!(s.id, SETTINGS_ID);
    assert_eq!(s.event_title, DEFAULT_EVENT_TITLE);
    assert_eq!(s.event_mode, EventMode::Hybrid);
    assert_eq!(s.organizing_dept.as_deref(), Some(DEFAULT_ORGANIZING_DEPT));
    assert_eq!(s.event_location, "Kolkata");
    assert_eq!(s.event_dates, "");
  }

  #[test]
  fn mode_round_trips_through_its_column_text() {
    assert_eq!(EventMode::Online.as_ref(), "Online");
    assert_eq!(EventMode::parse("Offline").unwrap(), EventMode::Offline);
    assert!(EventMode::parse("Remote").is_err());
  }

  #[test]
  fn patch_rejects_unknown_keys() {
    let err = serde_json::from_str::<SettingsPatch>(r#"{"eventTitel":"x"}"#);
    assert!(err.is_err());
  }

  #[test]
  fn blank_title_is_invalid() {
    let patch = SettingsPatch { event_title: Some(" ".into()), ..Default::default() };
    assert_eq!(patch.validate(), Err(Error::MissingField("eventTitle")));
  }
}
