//! The seven editable resources and how each maps onto the API client.
//!
//! Screens work on `serde_json::Value` rows so the list, detail and form
//! panes stay generic; the typed client methods are only touched here.

use confsite_core::{RecordId, committee::CommitteeRole, page::KNOWN_SLUGS};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::{
  client::{ApiClient, ClientError},
  form::{FieldKind, FieldSpec, Mode, RecordKey},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
  Settings,
  Speakers,
  Dates,
  Committee,
  Fees,
  Contacts,
  Pages,
}

impl Resource {
  pub const ALL: [Resource; 7] = [
    Resource::Settings,
    Resource::Speakers,
    Resource::Dates,
    Resource::Committee,
    Resource::Fees,
    Resource::Contacts,
    Resource::Pages,
  ];

  pub fn title(self) -> &'static str {
    match self {
      Resource::Settings => "Settings",
      Resource::Speakers => "Speakers",
      Resource::Dates => "Dates",
      Resource::Committee => "Committee",
      Resource::Fees => "Fees",
      Resource::Contacts => "Contacts",
      Resource::Pages => "Pages",
    }
  }

  pub fn next(self) -> Self {
    let i = Self::ALL.iter().position(|r| *r == self).unwrap_or(0);
    Self::ALL[(i + 1) % Self::ALL.len()]
  }

  pub fn prev(self) -> Self {
    let i = Self::ALL.iter().position(|r| *r == self).unwrap_or(0);
    Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
  }

  /// Settings is a single row edited in place.
  pub fn can_add(self) -> bool { self != Resource::Settings }

  /// Settings and pages are overwritten, never removed.
  pub fn can_delete(self) -> bool { !matches!(self, Resource::Settings | Resource::Pages) }

  pub fn fields(self) -> &'static [FieldSpec] {
    match self {
      Resource::Settings => SETTINGS_FIELDS,
      Resource::Speakers => SPEAKER_FIELDS,
      Resource::Dates => DATE_FIELDS,
      Resource::Committee => COMMITTEE_FIELDS,
      Resource::Fees => FEE_FIELDS,
      Resource::Contacts => CONTACT_FIELDS,
      Resource::Pages => PAGE_FIELDS,
    }
  }

  /// How a row is addressed when edited or deleted.
  pub fn record_key(self, row: &Value) -> Option<RecordKey> {
    match self {
      Resource::Settings => Some(RecordKey::Settings),
      Resource::Pages => row
        .get("slug")
        .and_then(Value::as_str)
        .map(|s| RecordKey::Slug(s.to_owned())),
      _ => row.get("id").and_then(Value::as_i64).map(RecordKey::Id),
    }
  }

  /// One-line summary shown in the list pane.
  pub fn row_label(self, row: &Value) -> String {
    let s = |key: &str| row.get(key).and_then(Value::as_str).unwrap_or_default();
    match self {
      Resource::Settings if row.get("id").is_none() => "(not configured)".to_owned(),
      Resource::Settings => s("eventTitle").to_owned(),
      Resource::Speakers => format!("{} · {}", s("name"), s("affiliation")),
      Resource::Dates => {
        let star = if row.get("isHighlight").and_then(Value::as_bool).unwrap_or(false) {
          "★ "
        } else {
          ""
        };
        format!("{star}{} · {}", s("date"), s("description"))
      }
      Resource::Committee => format!("[{}] {}", s("role"), s("name")),
      Resource::Fees => format!(
        "{} · {} / {}",
        s("category"),
        s("indianFee"),
        s("internationalFee")
      ),
      Resource::Contacts => format!("{} <{}>", s("name"), s("email")),
      Resource::Pages => {
        let title = s("title");
        if title.is_empty() {
          format!("{} (empty)", s("slug"))
        } else {
          format!("{} · {title}", s("slug"))
        }
      }
    }
  }

  // ── API dispatch ──────────────────────────────────────────────────────────

  pub async fn load(
    self,
    client: &ApiClient,
    role: Option<CommitteeRole>,
  ) -> Result<Vec<Value>, ClientError> {
    let rows = match self {
      Resource::Settings => match client.settings().await? {
        Some(settings) => vec![serde_json::to_value(settings)?],
        None => vec![json!({})],
      },
      Resource::Speakers => to_rows(client.speakers().await?)?,
      Resource::Dates => to_rows(client.dates().await?)?,
      Resource::Committee => to_rows(client.committee(role).await?)?,
      Resource::Fees => to_rows(client.fees().await?)?,
      Resource::Contacts => to_rows(client.contacts().await?)?,
      Resource::Pages => with_known_slugs(to_rows(client.pages().await?)?),
    };
    Ok(rows)
  }

  /// Create or update one record from a form body.
  pub async fn submit(
    self,
    client: &ApiClient,
    mode: Mode,
    body: Value,
  ) -> Result<(), ClientError> {
    match (self, mode) {
      (Resource::Settings, _) => {
        client.update_settings(&decode(body)?).await?;
      }
      (Resource::Pages, Mode::Existing(RecordKey::Slug(slug))) => {
        client.update_page(&slug, &decode(body)?).await?;
      }
      (Resource::Pages, _) => {
        let mut body = body;
        let slug = body
          .as_object_mut()
          .and_then(|o| o.remove("slug"))
          .and_then(|v| v.as_str().map(str::to_owned))
          .unwrap_or_default();
        client.update_page(&slug, &decode(body)?).await?;
      }
      (Resource::Speakers, Mode::New) => {
        client.create_speaker(&decode(body)?).await?;
      }
      (Resource::Speakers, Mode::Existing(key)) => {
        client.update_speaker(id_of(&key)?, &decode(body)?).await?;
      }
      (Resource::Dates, Mode::New) => {
        client.create_date(&decode(body)?).await?;
      }
      (Resource::Dates, Mode::Existing(key)) => {
        client.update_date(id_of(&key)?, &decode(body)?).await?;
      }
      (Resource::Committee, Mode::New) => {
        client.create_committee_member(&decode(body)?).await?;
      }
      (Resource::Committee, Mode::Existing(key)) => {
        client.update_committee_member(id_of(&key)?, &decode(body)?).await?;
      }
      (Resource::Fees, Mode::New) => {
        client.create_fee(&decode(body)?).await?;
      }
      (Resource::Fees, Mode::Existing(key)) => {
        client.update_fee(id_of(&key)?, &decode(body)?).await?;
      }
      (Resource::Contacts, Mode::New) => {
        client.create_contact(&decode(body)?).await?;
      }
      (Resource::Contacts, Mode::Existing(key)) => {
        client.update_contact(id_of(&key)?, &decode(body)?).await?;
      }
    }
    Ok(())
  }

  pub async fn delete(self, client: &ApiClient, id: RecordId) -> Result<(), ClientError> {
    match self {
      Resource::Speakers => client.delete_speaker(id).await,
      Resource::Dates => client.delete_date(id).await,
      Resource::Committee => client.delete_committee_member(id).await,
      Resource::Fees => client.delete_fee(id).await,
      Resource::Contacts => client.delete_contact(id).await,
      Resource::Settings | Resource::Pages => Ok(()),
    }
  }
}

fn to_rows<T: serde::Serialize>(records: Vec<T>) -> Result<Vec<Value>, ClientError> {
  records
    .into_iter()
    .map(|r| serde_json::to_value(r).map_err(ClientError::from))
    .collect()
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ClientError> {
  Ok(serde_json::from_value(body)?)
}

fn id_of(key: &RecordKey) -> Result<RecordId, ClientError> {
  match key {
    RecordKey::Id(id) => Ok(*id),
    other => Err(ClientError::Api {
      status:  400,
      message: format!("no record id for {other:?}"),
    }),
  }
}

/// Stored pages plus a placeholder row for each well-known slug not yet saved.
fn with_known_slugs(mut rows: Vec<Value>) -> Vec<Value> {
  for slug in KNOWN_SLUGS {
    let present = rows
      .iter()
      .any(|r| r.get("slug").and_then(Value::as_str) == Some(slug));
    if !present {
      rows.push(json!({ "slug": slug, "title": "", "content": "" }));
    }
  }
  rows.sort_by(|a, b| {
    let slug = |v: &Value| v.get("slug").and_then(Value::as_str).unwrap_or_default().to_owned();
    slug(a).cmp(&slug(b))
  });
  rows
}

// ─── Field tables ─────────────────────────────────────────────────────────────

const fn text(key: &'static str, label: &'static str, required: bool) -> FieldSpec {
  FieldSpec { key, label, kind: FieldKind::Text, required }
}

const SETTINGS_FIELDS: &[FieldSpec] = &[
  text("eventTitle", "Event title", true),
  text("eventSubtitle", "Subtitle", false),
  text("eventDates", "Event dates", false),
  text("eventLocation", "Location", false),
  FieldSpec {
    key:      "eventMode",
    label:    "Mode",
    kind:     FieldKind::Choice(&["Hybrid", "Offline", "Online"]),
    required: true,
  },
  text("publicationInfo", "Publication info", false),
  text("organizingDept", "Organising dept.", false),
];

const SPEAKER_FIELDS: &[FieldSpec] = &[
  text("name", "Name", true),
  text("designation", "Designation", true),
  text("affiliation", "Affiliation", true),
  text("title", "Talk title", false),
  text("imageUrl", "Image URL", true),
  FieldSpec { key: "bio", label: "Bio", kind: FieldKind::Multiline, required: false },
  text("linkedinUrl", "LinkedIn URL", false),
  FieldSpec { key: "displayOrder", label: "Display order", kind: FieldKind::Integer, required: false },
];

const DATE_FIELDS: &[FieldSpec] = &[
  text("date", "Date", true),
  text("description", "Description", true),
  FieldSpec { key: "isHighlight", label: "Highlight", kind: FieldKind::Toggle, required: false },
];

const COMMITTEE_FIELDS: &[FieldSpec] = &[
  text("name", "Name", true),
  text("affiliation", "Affiliation", true),
  text("designation", "Designation", false),
  FieldSpec {
    key:      "role",
    label:    "Role",
    kind:     FieldKind::Choice(&["Advisory", "Organizing", "TPC"]),
    required: true,
  },
  FieldSpec { key: "displayOrder", label: "Display order", kind: FieldKind::Integer, required: false },
];

const FEE_FIELDS: &[FieldSpec] = &[
  text("category", "Category", true),
  text("indianFee", "Indian fee", true),
  text("internationalFee", "International fee", true),
  FieldSpec { key: "order", label: "Order", kind: FieldKind::Integer, required: false },
];

const CONTACT_FIELDS: &[FieldSpec] = &[
  text("name", "Name", true),
  text("designation", "Designation", true),
  text("email", "Email", true),
  text("phone", "Phone", true),
  text("department", "Department", false),
];

const PAGE_FIELDS: &[FieldSpec] = &[
  FieldSpec { key: "slug", label: "Slug", kind: FieldKind::Key, required: true },
  text("title", "Title", true),
  FieldSpec { key: "content", label: "Content (HTML)", kind: FieldKind::Multiline, required: false },
  text("lastUpdatedBy", "Updated by", false),
];
