//! Registration fee categories.
//!
//! Fees are display strings ("₹10,000", "$300"), never amounts. Nothing in
//! the system does arithmetic on them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  RecordId, Result,
  validate::{Validate, merge_required, require, require_if_present},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFee {
  pub id:                RecordId,
  /// e.g. "Academic", "Student".
  pub category:          String,
  pub indian_fee:        String,
  pub international_fee: String,
  pub order:             i64,
  pub created_at:        DateTime<Utc>,
  pub updated_at:        DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewRegistrationFee {
  pub category:          String,
  pub indian_fee:        String,
  pub international_fee: String,
  #[serde(default)]
  pub order:             i64,
}

impl Validate for NewRegistrationFee {
  fn validate(&self) -> Result<()> {
    require("category", &self.category)?;
    require("indianFee", &self.indian_fee)?;
    require("internationalFee", &self.international_fee)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegistrationFeePatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub indian_fee:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub international_fee: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub order:             Option<i64>,
}

impl Validate for RegistrationFeePatch {
  fn validate(&self) -> Result<()> {
    require_if_present("category", self.category.as_ref())?;
    require_if_present("indianFee", self.indian_fee.as_ref())?;
    require_if_present("internationalFee", self.international_fee.as_ref())
  }
}

impl RegistrationFee {
  pub fn apply(&mut self, patch: RegistrationFeePatch, now: DateTime<Utc>) {
    merge_required(&mut self.category, patch.category);
    merge_required(&mut self.indian_fee, patch.indian_fee);
    merge_required(&mut self.international_fee, patch.international_fee);
    if let Some(order) = patch.order {
      self.order = order;
    }
    self.updated_at = now;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fee_strings_pass_through_untouched() {
    let fee: NewRegistrationFee = serde_json::from_str(
      r#"{"category":"Student","indianFee":"₹10,000","internationalFee":"$150"}"#,
    )
    .unwrap();
    assert_eq!(fee.indian_fee, "₹10,000");
    assert_eq!(fee.order, 0);
    assert!(fee.validate().is_ok());
  }
}
