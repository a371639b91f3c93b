//! Payload validation shared by every resource.
//!
//! Shape errors (unknown or missing keys, wrong JSON types) are rejected by
//! serde before a payload exists. [`Validate`] covers what serde cannot see:
//! required text that is present but blank, and malformed page slugs.

use crate::{Error, Result};

/// Checks run on a decoded payload before it reaches a store.
pub trait Validate {
  fn validate(&self) -> Result<()>;
}

/// A required text field must contain something other than whitespace.
pub fn require(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::MissingField(field));
  }
  Ok(())
}

/// A patch may omit a required field, but may not blank it.
pub fn require_if_present(field: &'static str, value: Option<&String>) -> Result<()> {
  match value {
    Some(v) => require(field, v),
    None => Ok(()),
  }
}

/// Optional text is stored as `NULL` rather than as an empty string.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

/// Apply a patch value to an optional column. An empty string clears it.
pub fn merge_optional(slot: &mut Option<String>, value: Option<String>) {
  if let Some(v) = value {
    *slot = normalize_optional(Some(v));
  }
}

/// Apply a patch value to a required column.
pub fn merge_required(slot: &mut String, value: Option<String>) {
  if let Some(v) = value {
    *slot = v;
  }
}

const MAX_SLUG_LEN: usize = 128;

/// Page slugs are caller-chosen path segments such as `call-for-paper`.
pub fn validate_slug(slug: &str) -> Result<()> {
  let ok = !slug.is_empty()
    && slug.len() <= MAX_SLUG_LEN
    && slug
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
  if ok {
    Ok(())
  } else {
    Err(Error::InvalidSlug(slug.to_owned()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_required_field_is_rejected() {
    assert_eq!(require("name", "   "), Err(Error::MissingField("name")));
    assert!(require("name", "Dr. A").is_ok());
  }

  #[test]
  fn absent_patch_field_passes() {
    assert!(require_if_present("name", None).is_ok());
    assert!(require_if_present("name", Some(&String::new())).is_err());
  }

  #[test]
  fn empty_string_clears_optional_column() {
    let mut slot = Some("old".to_string());
    merge_optional(&mut slot, None);
    assert_eq!(slot.as_deref(), Some("old"));
    merge_optional(&mut slot, Some(String::new()));
    assert_eq!(slot, None);
  }

  #[test]
  fn slugs() {
    assert!(validate_slug("call-for-paper").is_ok());
    assert!(validate_slug("paper_template2").is_ok());
    assert!(validate_slug("").is_err());
    assert!(validate_slug("../etc").is_err());
    assert!(validate_slug("has space").is_err());
  }
}
