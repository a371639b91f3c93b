//! Keynote and invited speakers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  RecordId, Result,
  validate::{Validate, merge_optional, merge_required, require, require_if_present},
};

pub const DEFAULT_SPEAKER_TITLE: &str = "Keynote Speaker";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
  pub id:            RecordId,
  pub name:          String,
  /// e.g. "Assistant Professor".
  pub designation:   String,
  /// e.g. "IIT Kharagpur".
  pub affiliation:   String,
  pub title:         String,
  pub image_url:     String,
  pub bio:           Option<String>,
  pub linkedin_url:  Option<String>,
  /// Sort key only; assigned as `max + 1` when the caller omits it.
  pub display_order: i64,
  pub created_at:    DateTime<Utc>,
  pub updated_at:    DateTime<Utc>,
}

/// Body of `POST /speakers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewSpeaker {
  pub name:          String,
  pub designation:   String,
  pub affiliation:   String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title:         Option<String>,
  pub image_url:     String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub bio:           Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub linkedin_url:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub display_order: Option<i64>,
}

impl Validate for NewSpeaker {
  fn validate(&self) -> Result<()> {
    require("name", &self.name)?;
    require("designation", &self.designation)?;
    require("affiliation", &self.affiliation)?;
    require("imageUrl", &self.image_url)
  }
}

/// Body of `PATCH /speakers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SpeakerPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub designation:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub affiliation:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image_url:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub bio:           Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub linkedin_url:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub display_order: Option<i64>,
}

impl Validate for SpeakerPatch {
  fn validate(&self) -> Result<()> {
    require_if_present("name", self.name.as_ref())?;
    require_if_present("designation", self.designation.as_ref())?;
    require_if_present("affiliation", self.affiliation.as_ref())?;
    require_if_present("imageUrl", self.image_url.as_ref())
  }
}

impl Speaker {
  pub fn apply(&mut self, patch: SpeakerPatch, now: DateTime<Utc>) {
    merge_required(&mut self.name, patch.name);
    merge_required(&mut self.designation, patch.designation);
    merge_required(&mut self.affiliation, patch.affiliation);
    if let Some(title) = patch.title {
      self.title = title_or_default(Some(title));
    }
    merge_required(&mut self.image_url, patch.image_url);
    merge_optional(&mut self.bio, patch.bio);
    merge_optional(&mut self.linkedin_url, patch.linkedin_url);
    if let Some(order) = patch.display_order {
      self.display_order = order;
    }
    self.updated_at = now;
  }
}

/// A blank or missing title falls back to [`DEFAULT_SPEAKER_TITLE`].
pub fn title_or_default(title: Option<String>) -> String {
  title
    .filter(|t| !t.trim().is_empty())
    .unwrap_or_else(|| DEFAULT_SPEAKER_TITLE.to_owned())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Error;

  #[test]
  fn minimal_body_decodes() {
    let body = r#"{"name":"Dr. A","affiliation":"X","designation":"Prof","imageUrl":"http://img"}"#;
    let s: NewSpeaker = serde_json::from_str(body).unwrap();
    assert!(s.validate().is_ok());
    assert_eq!(s.title, None);
    assert_eq!(title_or_default(s.title), DEFAULT_SPEAKER_TITLE);
  }

  #[test]
  fn missing_image_is_a_shape_error() {
    let body = r#"{"name":"Dr. A","affiliation":"X","designation":"Prof"}"#;
    assert!(serde_json::from_str::<NewSpeaker>(body).is_err());
  }

  #[test]
  fn blank_name_fails_validation() {
    let patch = SpeakerPatch { name: Some(String::new()), ..Default::default() };
    assert_eq!(patch.validate(), Err(Error::MissingField("name")));
  }

  #[test]
  fn apply_touches_only_supplied_fields() {
    let created = Utc::now();
    let mut s = Speaker {
      id:            1,
      name:          "Dr. A".into(),
      designation:   "Prof".into(),
      affiliation:   "X".into(),
      title:         DEFAULT_SPEAKER_TITLE.into(),
      image_url:     "http://img".into(),
      bio:           Some("bio".into()),
      linkedin_url:  None,
      display_order: 3,
      created_at:    created,
      updated_at:    created,
    };
    let later = created + chrono::Duration::seconds(5);
    s.apply(
      SpeakerPatch { affiliation: Some("Y".into()), bio: Some(String::new()), ..Default::default() },
      later,
    );
    assert_eq!(s.name, "Dr. A");
    assert_eq!(s.affiliation, "Y");
    assert_eq!(s.bio, None);
    assert_eq!(s.display_order, 3);
    assert_eq!(s.updated_at, later);
    assert_eq!(s.created_at, created);
  }
}
