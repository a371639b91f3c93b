//! [`SqliteStore`]: the SQLite implementation of [`SiteStore`].

use std::path::Path;

use confsite_core::{
  RecordId,
  committee::{CommitteeMember, CommitteeMemberPatch, CommitteeRole, NewCommitteeMember},
  contact::{Contact, ContactPatch, NewContact},
  date::{ImportantDate, ImportantDatePatch, NewImportantDate, sort_chronologically},
  fee::{NewRegistrationFee, RegistrationFee, RegistrationFeePatch},
  page::{Page, PagePatch},
  settings::{SETTINGS_ID, Settings, SettingsPatch},
  speaker::{NewSpeaker, Speaker, SpeakerPatch},
  store::SiteStore,
};
use rusqlite::params;

use crate::{
  Error, Result,
  encode::now,
  schema::SCHEMA,
  table::{self, Table},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A conference-site store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open a store from a connection string: a bare path, `sqlite://<path>`,
  /// `sqlite:<path>`, or `:memory:`.
  pub async fn connect(url: &str) -> Result<Self> {
    let target = url
      .strip_prefix("sqlite://")
      .or_else(|| url.strip_prefix("sqlite:"))
      .unwrap_or(url);

    match target {
      "" => Err(Error::ConnectionString(url.to_owned())),
      ":memory:" => Self::open_in_memory().await,
      path => Self::open(path).await,
    }
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("schema initialised");
    Ok(())
  }

  // ── Generic row operations ────────────────────────────────────────────────

  async fn list_rows<T>(&self) -> Result<Vec<T>>
  where
    T: Table + Send + 'static,
  {
    let rows = self
      .conn
      .call(|conn| Ok(table::select::<T, _>(conn, "", params![])?))
      .await?;
    Ok(rows)
  }

  /// Read-merge-write of one row inside a transaction. `None` if `id` is
  /// unknown.
  async fn update_row<T, F>(&self, id: RecordId, apply: F) -> Result<Option<T>>
  where
    T: Table + Send + 'static,
    F: FnOnce(&mut T) + Send + 'static,
  {
    let updated = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(mut row) = table::select_one::<T>(&tx, id)? else {
          return Ok(None);
        };
        apply(&mut row);
        row.write_back(&tx)?;
        tx.commit()?;
        Ok(Some(row))
      })
      .await?;

    if updated.is_none() {
      tracing::debug!(table = T::NAME, id, "update of unknown id");
    }
    Ok(updated)
  }

  async fn delete_row<T>(&self, id: RecordId) -> Result<()>
  where
    T: Table + Send + 'static,
  {
    let removed = self
      .conn
      .call(move |conn| Ok(table::delete::<T>(conn, id)?))
      .await?;
    tracing::debug!(table = T::NAME, id, removed, "delete");
    Ok(())
  }
}

// ─── SiteStore impl ──────────────────────────────────────────────────────────

impl SiteStore for SqliteStore {
  type Error = Error;

  // ── Settings ──────────────────────────────────────────────────────────────

  async fn get_settings(&self) -> Result<Option<Settings>> {
    let settings = self
      .conn
      .call(|conn| Ok(table::select_one::<Settings>(conn, SETTINGS_ID)?))
      .await?;
    Ok(settings)
  }

  async fn upsert_settings(&self, patch: SettingsPatch) -> Result<Settings> {
    let now = now();
    let settings = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let settings = match table::select_one::<Settings>(&tx, SETTINGS_ID)? {
          Some(mut existing) => {
            existing.apply(patch, now);
            existing.write_back(&tx)?;
            existing
          }
          None => {
            let created = Settings::from_patch(patch, now);
            table::insert_settings(&tx, &created)?;
            created
          }
        };
        tx.commit()?;
        Ok(settings)
      })
      .await?;
    Ok(settings)
  }

  // ── Speakers ──────────────────────────────────────────────────────────────

  async fn list_speakers(&self) -> Result<Vec<Speaker>> { self.list_rows().await }

  async fn create_speaker(&self, input: NewSpeaker) -> Result<Speaker> {
    let now = now();
    let speaker = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let speaker = table::insert_speaker(&tx, input, now)?;
        tx.commit()?;
        Ok(speaker)
      })
      .await?;
    tracing::debug!(id = speaker.id, "speaker created");
    Ok(speaker)
  }

  async fn update_speaker(&self, id: RecordId, patch: SpeakerPatch) -> Result<Option<Speaker>> {
    let now = now();
    self
      .update_row(id, move |s: &mut Speaker| s.apply(patch, now))
      .await
  }

  async fn delete_speaker(&self, id: RecordId) -> Result<()> {
    self.delete_row::<Speaker>(id).await
  }

  // ── Important dates ───────────────────────────────────────────────────────

  async fn list_dates(&self) -> Result<Vec<ImportantDate>> {
    let mut dates: Vec<ImportantDate> = self.list_rows().await?;
    sort_chronologically(&mut dates);
    Ok(dates)
  }

  async fn create_date(&self, input: NewImportantDate) -> Result<ImportantDate> {
    let now = now();
    let date = self
      .conn
      .call(move |conn| Ok(table::insert_date(conn, input, now)?))
      .await?;
    tracing::debug!(id = date.id, "important date created");
    Ok(date)
  }

  async fn update_date(
    &self,
    id: RecordId,
    patch: ImportantDatePatch,
  ) -> Result<Option<ImportantDate>> {
    let now = now();
    self
      .update_row(id, move |d: &mut ImportantDate| d.apply(patch, now))
      .await
  }

  async fn delete_date(&self, id: RecordId) -> Result<()> {
    self.delete_row::<ImportantDate>(id).await
  }

  // ── Committee ─────────────────────────────────────────────────────────────

  async fn list_committee(&self, role: Option<CommitteeRole>) -> Result<Vec<CommitteeMember>> {
    let Some(role) = role else {
      return self.list_rows().await;
    };
    let role_str = role.as_ref().to_owned();
    let members = self
      .conn
      .call(move |conn| {
        Ok(table::select::<CommitteeMember, _>(
          conn,
          "WHERE role = ?1",
          params![role_str],
        )?)
      })
      .await?;
    Ok(members)
  }

  async fn create_committee_member(&self, input: NewCommitteeMember) -> Result<CommitteeMember> {
    let now = now();
    let member = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let member = table::insert_committee_member(&tx, input, now)?;
        tx.commit()?;
        Ok(member)
      })
      .await?;
    tracing::debug!(id = member.id, role = member.role.as_ref(), "committee member created");
    Ok(member)
  }

  async fn update_committee_member(
    &self,
    id: RecordId,
    patch: CommitteeMemberPatch,
  ) -> Result<Option<CommitteeMember>> {
    let now = now();
    self
      .update_row(id, move |m: &mut CommitteeMember| m.apply(patch, now))
      .await
  }

  async fn delete_committee_member(&self, id: RecordId) -> Result<()> {
    self.delete_row::<CommitteeMember>(id).await
  }

  // ── Registration fees ─────────────────────────────────────────────────────

  async fn list_fees(&self) -> Result<Vec<RegistrationFee>> { self.list_rows().await }

  async fn create_fee(&self, input: NewRegistrationFee) -> Result<RegistrationFee> {
    let now = now();
    let fee = self
      .conn
      .call(move |conn| Ok(table::insert_fee(conn, input, now)?))
      .await?;
    tracing::debug!(id = fee.id, "registration fee created");
    Ok(fee)
  }

  async fn update_fee(
    &self,
    id: RecordId,
    patch: RegistrationFeePatch,
  ) -> Result<Option<RegistrationFee>> {
    let now = now();
    self
      .update_row(id, move |f: &mut RegistrationFee| f.apply(patch, now))
      .await
  }

  async fn delete_fee(&self, id: RecordId) -> Result<()> {
    self.delete_row::<RegistrationFee>(id).await
  }

  // ── Contacts ──────────────────────────────────────────────────────────────

  async fn list_contacts(&self) -> Result<Vec<Contact>> { self.list_rows().await }

  async fn create_contact(&self, input: NewContact) -> Result<Contact> {
    let now = now();
    let contact = self
      .conn
      .call(move |conn| Ok(table::insert_contact(conn, input, now)?))
      .await?;
    tracing::debug!(id = contact.id, "contact created");
    Ok(contact)
  }

  async fn update_contact(&self, id: RecordId, patch: ContactPatch) -> Result<Option<Contact>> {
    let now = now();
    self
      .update_row(id, move |c: &mut Contact| c.apply(patch, now))
      .await
  }

  async fn delete_contact(&self, id: RecordId) -> Result<()> {
    self.delete_row::<Contact>(id).await
  }

  // ── Pages ─────────────────────────────────────────────────────────────────

  async fn list_pages(&self) -> Result<Vec<Page>> { self.list_rows().await }

  async fn get_page<'a>(&'a self, slug: &'a str) -> Result<Option<Page>> {
    let slug = slug.to_owned();
    let page = self
      .conn
      .call(move |conn| Ok(table::select_one::<Page>(conn, slug)?))
      .await?;
    Ok(page)
  }

  async fn upsert_page(&self, slug: String, patch: PagePatch) -> Result<Page> {
    let now = now();
    let page = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let page = match table::select_one::<Page>(&tx, slug.as_str())? {
          Some(mut existing) => {
            existing.apply(patch, now);
            existing.write_back(&tx)?;
            existing
          }
          None => {
            let created = Page::from_patch(slug, patch, now);
            table::insert_page(&tx, &created)?;
            created
          }
        };
        tx.commit()?;
        Ok(page)
      })
      .await?;
    tracing::debug!(slug = %page.slug, "page upserted");
    Ok(page)
  }
}
