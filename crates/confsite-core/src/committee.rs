//! Committee members grouped by role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::{
  Error, RecordId, Result,
  validate::{Validate, merge_optional, merge_required, require, require_if_present},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
pub enum CommitteeRole {
  Advisory,
  Organizing,
  #[serde(rename = "TPC")]
  #[strum(serialize = "TPC")]
  Tpc,
}

impl CommitteeRole {
  pub fn parse(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::UnknownCommitteeRole(s.to_owned()))
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeMember {
  pub id:            RecordId,
  pub name:          String,
  pub affiliation:   String,
  pub designation:   Option<String>,
  pub role:          CommitteeRole,
  pub display_order: i64,
  pub created_at:    DateTime<Utc>,
  pub updated_at:    DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCommitteeMember {
  pub name:          String,
  pub affiliation:   String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub designation:   Option<String>,
  pub role:          CommitteeRole,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub display_order: Option<i64>,
}

impl Validate for NewCommitteeMember {
  fn validate(&self) -> Result<()> {
    require("name", &self.name)?;
    require("affiliation", &self.affiliation)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CommitteeMemberPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub affiliation:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub designation:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub role:          Option<CommitteeRole>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub display_order: Option<i64>,
}

impl Validate for CommitteeMemberPatch {
  fn validate(&self) -> Result<()> {
    require_if_present("name", self.name.as_ref())?;
    require_if_present("affiliation", self.affiliation.as_ref())
  }
}

impl CommitteeMember {
  pub fn apply(&mut self, patch: CommitteeMemberPatch, now: DateTime<Utc>) {
    merge_required(&mut self.name, patch.name);
    merge_required(&mut self.affiliation, patch.affiliation);
    merge_optional(&mut self.designation, patch.designation);
    if let Some(role) = patch.role {
      self.role = role;
    }
    if let Some(order) = patch.display_order {
      self.display_order = order;
    }
    self.updated_at = now;
  }
}
