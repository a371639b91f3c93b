//! Organiser contacts shown on the contact page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  RecordId, Result,
  validate::{Validate, merge_optional, merge_required, require, require_if_present},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id:          RecordId,
  pub name:        String,
  pub designation: String,
  pub email:       String,
  pub phone:       String,
  pub department:  Option<String>,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewContact {
  pub name:        String,
  pub designation: String,
  pub email:       String,
  pub phone:       String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub department:  Option<String>,
}

impl Validate for NewContact {
  fn validate(&self) -> Result<()> {
    require("name", &self.name)?;
    require("designation", &self.designation)?;
    require("email", &self.email)?;
    require("phone", &self.phone)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContactPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub designation: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub department:  Option<String>,
}

impl Validate for ContactPatch {
  fn validate(&self) -> Result<()> {
    require_if_present("name", self.name.as_ref())?;
    require_if_present("designation", self.designation.as_ref())?;
    require_if_present("email", self.email.as_ref())?;
    require_if_present("phone", self.phone.as_ref())
  }
}

impl Contact {
  pub fn apply(&mut self, patch: ContactPatch, now: DateTime<Utc>) {
    merge_required(&mut self.name, patch.name);
    merge_required(&mut self.designation, patch.designation);
    merge_required(&mut self.email, patch.email);
    merge_required(&mut self.phone, patch.phone);
    merge_optional(&mut self.department, patch.department);
    self.updated_at = now;
  }
}
