//! CMS text pages keyed by slug (`call-for-paper`, `author-guidelines`, …).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  validate::{Validate, merge_optional, merge_required, require_if_present},
};

/// Title given to a page created by a patch that omits one.
pub const UNTITLED: &str = "Untitled";

/// Slugs the admin client offers out of the box. Any valid slug works.
pub const KNOWN_SLUGS: &[&str] =
  &["call-for-paper", "author-guidelines", "paper-template", "paper-submission"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
  pub slug:            String,
  pub title:           String,
  pub content:         String,
  pub last_updated_by: Option<String>,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PagePatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title:           Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub content:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub last_updated_by: Option<String>,
}

impl Validate for PagePatch {
  fn validate(&self) -> Result<()> { require_if_present("title", self.title.as_ref()) }
}

impl Page {
  /// A fresh page for `slug`, filled from `patch`.
  pub fn from_patch(slug: String, patch: PagePatch, now: DateTime<Utc>) -> Self {
    let mut page = Self {
      slug,
      title: UNTITLED.to_owned(),
      content: String::new(),
      last_updated_by: None,
      created_at: now,
      updated_at: now,
    };
    page.apply(patch, now);
    page
  }

  pub fn apply(&mut self, patch: PagePatch, now: DateTime<Utc>) {
    merge_required(&mut self.title, patch.title);
    merge_required(&mut self.content, patch.content);
    merge_optional(&mut self.last_updated_by, patch.last_updated_by);
    self.updated_at = now;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_page_without_title_is_untitled() {
    let page = Page::from_patch(
      "call-for-paper".into(),
      PagePatch { content: Some("C".into()), ..Default::default() },
      Utc::now(),
    );
    assert_eq!(page.title, UNTITLED);
    assert_eq!(page.content, "C");
  }

  #[test]
  fn empty_content_is_allowed() {
    let patch = PagePatch { content: Some(String::new()), ..Default::default() };
    assert!(patch.validate().is_ok());
  }
}
