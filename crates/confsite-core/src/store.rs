//! The `SiteStore` trait: the data-access layer between handlers and storage.
//!
//! One method per resource per operation. Implementations add no business
//! rules beyond default values and the list orderings documented on each
//! method. Higher layers (`confsite-api`) depend on this abstraction, not on a
//! concrete backend.

use std::future::Future;

use crate::{
  RecordId,
  committee::{CommitteeMember, CommitteeMemberPatch, CommitteeRole, NewCommitteeMember},
  contact::{Contact, ContactPatch, NewContact},
  date::{ImportantDate, ImportantDatePatch, NewImportantDate},
  fee::{NewRegistrationFee, RegistrationFee, RegistrationFeePatch},
  page::{Page, PagePatch},
  settings::{Settings, SettingsPatch},
  speaker::{NewSpeaker, Speaker, SpeakerPatch},
};

/// Abstraction over a conference-site storage backend.
///
/// Every operation touches exactly one table. List reads never fail for lack
/// of rows; they return an empty `Vec`. `update_*` returns `None` when the id
/// does not exist. `delete_*` succeeds whether or not the row existed.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait SiteStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Settings (singleton) ──────────────────────────────────────────────

  fn get_settings(
    &self,
  ) -> impl Future<Output = Result<Option<Settings>, Self::Error>> + Send + '_;

  /// Insert the singleton row from defaults plus `patch`, or merge `patch`
  /// into the existing row.
  fn upsert_settings(
    &self,
    patch: SettingsPatch,
  ) -> impl Future<Output = Result<Settings, Self::Error>> + Send + '_;

  // ── Speakers ──────────────────────────────────────────────────────────

  /// Ordered by `display_order`, then newest first, then id.
  fn list_speakers(
    &self,
  ) -> impl Future<Output = Result<Vec<Speaker>, Self::Error>> + Send + '_;

  fn create_speaker(
    &self,
    input: NewSpeaker,
  ) -> impl Future<Output = Result<Speaker, Self::Error>> + Send + '_;

  fn update_speaker(
    &self,
    id: RecordId,
    patch: SpeakerPatch,
  ) -> impl Future<Output = Result<Option<Speaker>, Self::Error>> + Send + '_;

  fn delete_speaker(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Important dates ───────────────────────────────────────────────────

  /// Chronological by parsed date; see [`crate::date::sort_chronologically`].
  fn list_dates(
    &self,
  ) -> impl Future<Output = Result<Vec<ImportantDate>, Self::Error>> + Send + '_;

  fn create_date(
    &self,
    input: NewImportantDate,
  ) -> impl Future<Output = Result<ImportantDate, Self::Error>> + Send + '_;

  fn update_date(
    &self,
    id: RecordId,
    patch: ImportantDatePatch,
  ) -> impl Future<Output = Result<Option<ImportantDate>, Self::Error>> + Send + '_;

  fn delete_date(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Committee ─────────────────────────────────────────────────────────

  /// Ordered by `display_order`, then id. `role` restricts to one committee.
  fn list_committee(
    &self,
    role: Option<CommitteeRole>,
  ) -> impl Future<Output = Result<Vec<CommitteeMember>, Self::Error>> + Send + '_;

  fn create_committee_member(
    &self,
    input: NewCommitteeMember,
  ) -> impl Future<Output = Result<CommitteeMember, Self::Error>> + Send + '_;

  fn update_committee_member(
    &self,
    id: RecordId,
    patch: CommitteeMemberPatch,
  ) -> impl Future<Output = Result<Option<CommitteeMember>, Self::Error>> + Send + '_;

  fn delete_committee_member(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Registration fees ─────────────────────────────────────────────────

  /// Ordered by `order`, then id.
  fn list_fees(
    &self,
  ) -> impl Future<Output = Result<Vec<RegistrationFee>, Self::Error>> + Send + '_;

  fn create_fee(
    &self,
    input: NewRegistrationFee,
  ) -> impl Future<Output = Result<RegistrationFee, Self::Error>> + Send + '_;

  fn update_fee(
    &self,
    id: RecordId,
    patch: RegistrationFeePatch,
  ) -> impl Future<Output = Result<Option<RegistrationFee>, Self::Error>> + Send + '_;

  fn delete_fee(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Contacts ──────────────────────────────────────────────────────────

  /// Ordered by id.
  fn list_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  fn create_contact(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  fn update_contact(
    &self,
    id: RecordId,
    patch: ContactPatch,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  fn delete_contact(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Pages (keyed by slug) ─────────────────────────────────────────────

  /// Ordered by slug.
  fn list_pages(
    &self,
  ) -> impl Future<Output = Result<Vec<Page>, Self::Error>> + Send + '_;

  fn get_page<'a>(
    &'a self,
    slug: &'a str,
  ) -> impl Future<Output = Result<Option<Page>, Self::Error>> + Send + 'a;

  /// Insert the page for `slug` or merge `patch` into it. One row per slug.
  fn upsert_page(
    &self,
    slug: String,
    patch: PagePatch,
  ) -> impl Future<Output = Result<Page, Self::Error>> + Send + '_;
}
