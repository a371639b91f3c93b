//! Row mapping for each table, plus the generic statements every resource
//! shares (select, select-by-key, delete).
//!
//! Everything here runs inside a `tokio_rusqlite` closure, so it works on a
//! plain [`rusqlite::Connection`] and returns [`rusqlite::Result`].

use chrono::{DateTime, Utc};
use confsite_core::{
  committee::{CommitteeMember, NewCommitteeMember},
  contact::{Contact, NewContact},
  date::{ImportantDate, NewImportantDate},
  fee::{NewRegistrationFee, RegistrationFee},
  page::Page,
  settings::Settings,
  speaker::{NewSpeaker, Speaker, title_or_default},
  validate::normalize_optional,
};
use rusqlite::{Connection, OptionalExtension as _, Params, Row, ToSql, params};

use crate::encode::{dt_column, encode_dt, event_mode_column, role_column};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A record type stored in exactly one table.
pub trait Table: Sized {
  const NAME: &'static str;
  /// Primary key column.
  const KEY: &'static str;
  /// Select list, in the order [`Table::from_row`] reads it.
  const COLUMNS: &'static str;
  /// Deterministic list ordering.
  const ORDER_BY: &'static str;

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

  /// Overwrite every mutable column of the stored row with `self`.
  fn write_back(&self, conn: &Connection) -> rusqlite::Result<()>;
}

/// `SELECT … FROM <table> <filter> ORDER BY …`; `filter` may be empty.
pub fn select<T: Table, P: Params>(
  conn: &Connection,
  filter: &str,
  params: P,
) -> rusqlite::Result<Vec<T>> {
  let sql = format!(
    "SELECT {} FROM {} {filter} ORDER BY {}",
    T::COLUMNS,
    T::NAME,
    T::ORDER_BY
  );
  let mut stmt = conn.prepare(&sql)?;
  let rows = stmt
    .query_map(params, T::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn select_one<T: Table>(conn: &Connection, key: impl ToSql) -> rusqlite::Result<Option<T>> {
  let sql = format!("SELECT {} FROM {} WHERE {} = ?1", T::COLUMNS, T::NAME, T::KEY);
  conn.query_row(&sql, params![key], T::from_row).optional()
}

/// Returns the number of rows removed (0 or 1).
pub fn delete<T: Table>(conn: &Connection, key: impl ToSql) -> rusqlite::Result<usize> {
  let sql = format!("DELETE FROM {} WHERE {} = ?1", T::NAME, T::KEY);
  conn.execute(&sql, params![key])
}

/// Next display order for `table`: one past the current maximum.
fn next_display_order(conn: &Connection, table: &str) -> rusqlite::Result<i64> {
  conn.query_row(
    &format!("SELECT COALESCE(MAX(display_order), 0) + 1 FROM {table}"),
    [],
    |r| r.get(0),
  )
}

// ─── Settings ────────────────────────────────────────────────────────────────

impl Table for Settings {
  const NAME: &'static str = "general_settings";
  const KEY: &'static str = "id";
  const COLUMNS: &'static str = "id, event_title, event_subtitle, event_dates, event_location, \
     event_mode, publication_info, organizing_dept, created_at, updated_at";
  const ORDER_BY: &'static str = "id";

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Settings {
      id:               row.get(0)?,
      event_title:      row.get(1)?,
      event_subtitle:   row.get(2)?,
      event_dates:      row.get(3)?,
      event_location:   row.get(4)?,
      event_mode:       event_mode_column(row, 5)?,
      publication_info: row.get(6)?,
      organizing_dept:  row.get(7)?,
      created_at:       dt_column(row, 8)?,
      updated_at:       dt_column(row, 9)?,
    })
  }

  fn write_back(&self, conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
      "UPDATE general_settings SET
         event_title = ?1, event_subtitle = ?2, event_dates = ?3,
         event_location = ?4, event_mode = ?5, publication_info = ?6,
         organizing_dept = ?7, updated_at = ?8
       WHERE id = ?9",
      params![
        self.event_title,
        self.event_subtitle,
        self.event_dates,
        self.event_location,
        self.event_mode.as_ref(),
        self.publication_info,
        self.organizing_dept,
        encode_dt(self.updated_at),
        self.id,
      ],
    )?;
    Ok(())
  }
}

pub fn insert_settings(conn: &Connection, s: &Settings) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO general_settings (
       id, event_title, event_subtitle, event_dates, event_location,
       event_mode, publication_info, organizing_dept, created_at, updated_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    params![
      s.id,
      s.event_title,
      s.event_subtitle,
      s.event_dates,
      s.event_location,
      s.event_mode.as_ref(),
      s.publication_info,
      s.organizing_dept,
      encode_dt(s.created_at),
      encode_dt(s.updated_at),
    ],
  )?;
  Ok(())
}

// ─── Speakers ────────────────────────────────────────────────────────────────

impl Table for Speaker {
  const NAME: &'static str = "speakers";
  const KEY: &'static str = "id";
  const COLUMNS: &'static str = "id, name, designation, affiliation, title, image_url, bio, \
     linkedin_url, display_order, created_at, updated_at";
  const ORDER_BY: &'static str = "display_order ASC, created_at DESC, id ASC";

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Speaker {
      id:            row.get(0)?,
      name:          row.get(1)?,
      designation:   row.get(2)?,
      affiliation:   row.get(3)?,
      title:         row.get(4)?,
      image_url:     row.get(5)?,
      bio:           row.get(6)?,
      linkedin_url:  row.get(7)?,
      display_order: row.get(8)?,
      created_at:    dt_column(row, 9)?,
      updated_at:    dt_column(row, 10)?,
    })
  }

  fn write_back(&self, conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
      "UPDATE speakers SET
         name = ?1, designation = ?2, affiliation = ?3, title = ?4,
         image_url = ?5, bio = ?6, linkedin_url = ?7, display_order = ?8,
         updated_at = ?9
       WHERE id = ?10",
      params![
        self.name,
        self.designation,
        self.affiliation,
        self.title,
        self.image_url,
        self.bio,
        self.linkedin_url,
        self.display_order,
        encode_dt(self.updated_at),
        self.id,
      ],
    )?;
    Ok(())
  }
}

pub fn insert_speaker(
  conn: &Connection,
  input: NewSpeaker,
  now: DateTime<Utc>,
) -> rusqlite::Result<Speaker> {
  let display_order = match input.display_order {
    Some(order) => order,
    None => next_display_order(conn, Speaker::NAME)?,
  };
  let mut speaker = Speaker {
    id: 0,
    name: input.name,
    designation: input.designation,
    affiliation: input.affiliation,
    title: title_or_default(input.title),
    image_url: input.image_url,
    bio: normalize_optional(input.bio),
    linkedin_url: normalize_optional(input.linkedin_url),
    display_order,
    created_at: now,
    updated_at: now,
  };
  conn.execute(
    "INSERT INTO speakers (
       name, designation, affiliation, title, image_url, bio, linkedin_url,
       display_order, created_at, updated_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    params![
      speaker.name,
      speaker.designation,
      speaker.affiliation,
      speaker.title,
      speaker.image_url,
      speaker.bio,
      speaker.linkedin_url,
      speaker.display_order,
      encode_dt(now),
      encode_dt(now),
    ],
  )?;
  speaker.id = conn.last_insert_rowid();
  Ok(speaker)
}

// ─── Important dates ─────────────────────────────────────────────────────────

impl Table for ImportantDate {
  const NAME: &'static str = "important_dates";
  const KEY: &'static str = "id";
  const COLUMNS: &'static str =
    "id, date_text, description, is_highlight, created_at, updated_at";
  // Insertion order; chronological sorting happens after the read.
  const ORDER_BY: &'static str = "id ASC";

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(ImportantDate {
      id:           row.get(0)?,
      date:         row.get(1)?,
      description:  row.get(2)?,
      is_highlight: row.get(3)?,
      created_at:   dt_column(row, 4)?,
      updated_at:   dt_column(row, 5)?,
    })
  }

  fn write_back(&self, conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
      "UPDATE important_dates SET
         date_text = ?1, description = ?2, is_highlight = ?3, updated_at = ?4
       WHERE id = ?5",
      params![
        self.date,
        self.description,
        self.is_highlight,
        encode_dt(self.updated_at),
        self.id,
      ],
    )?;
    Ok(())
  }
}

pub fn insert_date(
  conn: &Connection,
  input: NewImportantDate,
  now: DateTime<Utc>,
) -> rusqlite::Result<ImportantDate> {
  conn.execute(
    "INSERT INTO important_dates (date_text, description, is_highlight, created_at, updated_at)
     VALUES (?1, ?2, ?3, ?4, ?5)",
    params![
      input.date,
      input.description,
      input.is_highlight,
      encode_dt(now),
      encode_dt(now),
    ],
  )?;
  Ok(ImportantDate {
    id:           conn.last_insert_rowid(),
    date:         input.date,
    description:  input.description,
    is_highlight: input.is_highlight,
    created_at:   now,
    updated_at:   now,
  })
}

// ─── Committee ───────────────────────────────────────────────────────────────

impl Table for CommitteeMember {
  const NAME: &'static str = "committee";
  const KEY: &'static str = "id";
  const COLUMNS: &'static str =
    "id, name, affiliation, designation, role, display_order, created_at, updated_at";
  const ORDER_BY: &'static str = "display_order ASC, id ASC";

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(CommitteeMember {
      id:            row.get(0)?,
      name:          row.get(1)?,
      affiliation:   row.get(2)?,
      designation:   row.get(3)?,
      role:          role_column(row, 4)?,
      display_order: row.get(5)?,
      created_at:    dt_column(row, 6)?,
      updated_at:    dt_column(row, 7)?,
    })
  }

  fn write_back(&self, conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
      "UPDATE committee SET
         name = ?1, affiliation = ?2, designation = ?3, role = ?4,
         display_order = ?5, updated_at = ?6
       WHERE id = ?7",
      params![
        self.name,
        self.affiliation,
        self.designation,
        self.role.as_ref(),
        self.display_order,
        encode_dt(self.updated_at),
        self.id,
      ],
    )?;
    Ok(())
  }
}

pub fn insert_committee_member(
  conn: &Connection,
  input: NewCommitteeMember,
  now: DateTime<Utc>,
) -> rusqlite::Result<CommitteeMember> {
  let display_order = match input.display_order {
    Some(order) => order,
    None => next_display_order(conn, CommitteeMember::NAME)?,
  };
  let designation = normalize_optional(input.designation);
  conn.execute(
    "INSERT INTO committee (
       name, affiliation, designation, role, display_order, created_at, updated_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    params![
      input.name,
      input.affiliation,
      designation,
      input.role.as_ref(),
      display_order,
      encode_dt(now),
      encode_dt(now),
    ],
  )?;
  Ok(CommitteeMember {
    id: conn.last_insert_rowid(),
    name: input.name,
    affiliation: input.affiliation,
    designation,
    role: input.role,
    display_order,
    created_at: now,
    updated_at: now,
  })
}

// ─── Registration fees ───────────────────────────────────────────────────────

impl Table for RegistrationFee {
  const NAME: &'static str = "registration_fees";
  const KEY: &'static str = "id";
  const COLUMNS: &'static str =
    "id, category, indian_fee, international_fee, sort_order, created_at, updated_at";
  const ORDER_BY: &'static str = "sort_order ASC, id ASC";

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(RegistrationFee {
      id:                row.get(0)?,
      category:          row.get(1)?,
      indian_fee:        row.get(2)?,
      international_fee: row.get(3)?,
      order:             row.get(4)?,
      created_at:        dt_column(row, 5)?,
      updated_at:        dt_column(row, 6)?,
    })
  }

  fn write_back(&self, conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
      "UPDATE registration_fees SET
         category = ?1, indian_fee = ?2, international_fee = ?3,
         sort_order = ?4, updated_at = ?5
       WHERE id = ?6",
      params![
        self.category,
        self.indian_fee,
        self.international_fee,
        self.order,
        encode_dt(self.updated_at),
        self.id,
      ],
    )?;
    Ok(())
  }
}

pub fn insert_fee(
  conn: &Connection,
  input: NewRegistrationFee,
  now: DateTime<Utc>,
) -> rusqlite::Result<RegistrationFee> {
  conn.execute(
    "INSERT INTO registration_fees (
       category, indian_fee, international_fee, sort_order, created_at, updated_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    params![
      input.category,
      input.indian_fee,
      input.international_fee,
      input.order,
      encode_dt(now),
      encode_dt(now),
    ],
  )?;
  Ok(RegistrationFee {
    id:                conn.last_insert_rowid(),
    category:          input.category,
    indian_fee:        input.indian_fee,
    international_fee: input.international_fee,
    order:             input.order,
    created_at:        now,
    updated_at:        now,
  })
}

// ─── Contacts ────────────────────────────────────────────────────────────────

impl Table for Contact {
  const NAME: &'static str = "contacts";
  const KEY: &'static str = "id";
  const COLUMNS: &'static str =
    "id, name, designation, email, phone, department, created_at, updated_at";
  const ORDER_BY: &'static str = "id ASC";

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Contact {
      id:          row.get(0)?,
      name:        row.get(1)?,
      designation: row.get(2)?,
      email:       row.get(3)?,
      phone:       row.get(4)?,
      department:  row.get(5)?,
      created_at:  dt_column(row, 6)?,
      updated_at:  dt_column(row, 7)?,
    })
  }

  fn write_back(&self, conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
      "UPDATE contacts SET
         name = ?1, designation = ?2, email = ?3, phone = ?4,
         department = ?5, updated_at = ?6
       WHERE id = ?7",
      params![
        self.name,
        self.designation,
        self.email,
        self.phone,
        self.department,
        encode_dt(self.updated_at),
        self.id,
      ],
    )?;
    Ok(())
  }
}

pub fn insert_contact(
  conn: &Connection,
  input: NewContact,
  now: DateTime<Utc>,
) -> rusqlite::Result<Contact> {
  let department = normalize_optional(input.department);
  conn.execute(
    "INSERT INTO contacts (
       name, designation, email, phone, department, created_at, updated_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    params![
      input.name,
      input.designation,
      input.email,
      input.phone,
      department,
      encode_dt(now),
      encode_dt(now),
    ],
  )?;
  Ok(Contact {
    id: conn.last_insert_rowid(),
    name: input.name,
    designation: input.designation,
    email: input.email,
    phone: input.phone,
    department,
    created_at: now,
    updated_at: now,
  })
}

// ─── Pages ───────────────────────────────────────────────────────────────────

impl Table for Page {
  const NAME: &'static str = "pages";
  const KEY: &'static str = "slug";
  const COLUMNS: &'static str =
    "slug, title, content, last_updated_by, created_at, updated_at";
  const ORDER_BY: &'static str = "slug ASC";

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Page {
      slug:            row.get(0)?,
      title:           row.get(1)?,
      content:         row.get(2)?,
      last_updated_by: row.get(3)?,
      created_at:      dt_column(row, 4)?,
      updated_at:      dt_column(row, 5)?,
    })
  }

  fn write_back(&self, conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
      "UPDATE pages SET title = ?1, content = ?2, last_updated_by = ?3, updated_at = ?4
       WHERE slug = ?5",
      params![
        self.title,
        self.content,
        self.last_updated_by,
        encode_dt(self.updated_at),
        self.slug,
      ],
    )?;
    Ok(())
  }
}

pub fn insert_page(conn: &Connection, page: &Page) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO pages (slug, title, content, last_updated_by, created_at, updated_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    params![
      page.slug,
      page.title,
      page.content,
      page.last_updated_by,
      encode_dt(page.created_at),
      encode_dt(page.updated_at),
    ],
  )?;
  Ok(())
}
