//! Application state machine and event dispatcher.

use std::sync::Arc;

use confsite_core::committee::CommitteeRole;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use serde_json::Value;

use crate::{
  client::ApiClient,
  form::{FieldKind, Form, Mode, Phase, RecordKey},
  resource::Resource,
};

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// The resource tab in focus.
  pub resource: Resource,

  /// Rows of the current resource, as returned by the API.
  pub rows: Vec<Value>,

  /// Committee tab only: restrict the list to one role.
  pub role_filter: Option<CommitteeRole>,

  /// Current fuzzy-filter string (only active when `filter_active`).
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* row list.
  pub list_cursor: usize,

  /// Add/edit dialog for the current resource.
  pub form: Form,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    let resource = Resource::Settings;
    Self {
      resource,
      rows: Vec::new(),
      role_filter: None,
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      form: Form::new(resource.fields()),
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch the current resource's rows. Failures land in the status bar.
  pub async fn reload(&mut self) {
    match self.resource.load(&self.client, self.role_filter).await {
      Ok(rows) => {
        self.rows = rows;
        let len = self.filtered_rows().len();
        if self.list_cursor >= len {
          self.list_cursor = len.saturating_sub(1);
        }
      }
      Err(e) => {
        tracing::warn!(resource = self.resource.title(), error = %e, "load failed");
        self.status_msg = format!("Error: {e}");
      }
    }
  }

  async fn switch_to(&mut self, resource: Resource) {
    self.reset_view(resource);
    self.reload().await;
  }

  /// Per-tab state starts fresh, including the committee role filter.
  fn reset_view(&mut self, resource: Resource) {
    self.resource = resource;
    self.form = Form::new(resource.fields());
    self.role_filter = None;
    self.filter.clear();
    self.filter_active = false;
    self.list_cursor = 0;
    self.status_msg.clear();
    self.rows.clear();
  }

  // ── Filtered list ─────────────────────────────────────────────────────────

  /// Rows whose label matches the current filter query.
  pub fn filtered_rows(&self) -> Vec<&Value> {
    if self.filter.is_empty() {
      return self.rows.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .rows
      .iter()
      .filter(|row| {
        matcher
          .fuzzy_match(&self.resource.row_label(row), &self.filter)
          .is_some()
      })
      .collect()
  }

  /// The row under the list cursor in the filtered view, if any.
  pub fn cursor_row(&self) -> Option<&Value> {
    self.filtered_rows().get(self.list_cursor).copied()
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if self.form.is_open() {
      self.handle_form_key(key).await;
      return Ok(true);
    }

    if self.filter_active {
      self.handle_filter_key(key);
      return Ok(true);
    }

    self.handle_list_key(key).await
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.list_cursor = 0;
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.list_cursor = 0;
      }
      _ => {}
    }
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),

      // Tabs
      KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
        self.switch_to(self.resource.next()).await;
      }
      KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
        self.switch_to(self.resource.prev()).await;
      }
      KeyCode::Char(c @ '1'..='7') => {
        let i = (c as usize) - ('1' as usize);
        self.switch_to(Resource::ALL[i]).await;
      }

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_rows().len();
        if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      // Filter
      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }

      // Mutations
      KeyCode::Char('a') => self.start_add(),
      KeyCode::Char('e') | KeyCode::Enter => self.start_edit().await,
      KeyCode::Char('d') => self.delete_selected().await,

      KeyCode::Char('r') => {
        self.status_msg.clear();
        self.reload().await;
      }
      KeyCode::Char('f') if self.resource == Resource::Committee => {
        self.role_filter = match self.role_filter {
          None => Some(CommitteeRole::Advisory),
          Some(CommitteeRole::Advisory) => Some(CommitteeRole::Organizing),
          Some(CommitteeRole::Organizing) => Some(CommitteeRole::Tpc),
          Some(CommitteeRole::Tpc) => None,
        };
        self.list_cursor = 0;
        self.reload().await;
      }

      _ => {}
    }
    Ok(true)
  }

  async fn handle_form_key(&mut self, key: KeyEvent) {
    if matches!(self.form.phase, Phase::Submitting(_)) {
      return;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
      KeyCode::Esc => {
        self.form.cancel();
        self.status_msg = "Cancelled".into();
      }
      KeyCode::Char('s') if ctrl => self.submit().await,
      KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
      KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
      KeyCode::Left => self.form.cycle(false),
      KeyCode::Right => self.form.cycle(true),
      KeyCode::Enter => {
        if self
          .form
          .focused()
          .is_some_and(|f| f.kind == FieldKind::Multiline)
        {
          self.form.newline();
        } else {
          self.form.focus_next();
        }
      }
      KeyCode::Backspace => self.form.backspace(),
      KeyCode::Char(c) => self.form.input(c),
      _ => {}
    }
  }

  // ── Actions ───────────────────────────────────────────────────────────────

  fn start_add(&mut self) {
    if !self.resource.can_add() {
      self.status_msg = format!("{} cannot be added to", self.resource.title());
      return;
    }
    self.form.begin_new();
    self.status_msg.clear();
  }

  async fn start_edit(&mut self) {
    let Some(mut row) = self.cursor_row().cloned() else {
      return;
    };
    let Some(key) = self.resource.record_key(&row) else {
      return;
    };
    // The list may be stale; edit the latest copy of the page.
    if let RecordKey::Slug(slug) = &key {
      match self.client.page(slug).await {
        Ok(Some(page)) => row = serde_json::to_value(page).unwrap_or(row),
        Ok(None) => {}
        Err(e) => tracing::debug!(slug, error = %e, "page refresh failed"),
      }
    }
    self.form.begin_edit(key, &row);
    self.status_msg.clear();
  }

  async fn submit(&mut self) {
    let (mode, body) = match self.form.begin_submit() {
      Ok(ready) => ready,
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        return;
      }
    };
    let verb = if mode == Mode::New { "Created" } else { "Saved" };

    match self.resource.submit(&self.client, mode, body).await {
      Ok(()) => {
        self.form.finish_submit(true);
        self.status_msg = format!("{verb} {}", self.resource.title().to_lowercase());
        self.reload().await;
      }
      Err(e) => {
        tracing::warn!(resource = self.resource.title(), error = %e, "submit failed");
        self.form.finish_submit(false);
        self.status_msg = format!("Error: {e}");
      }
    }
  }

  /// Immediate delete of the selected row, then reload.
  async fn delete_selected(&mut self) {
    if !self.resource.can_delete() {
      self.status_msg = format!("{} cannot be deleted", self.resource.title());
      return;
    }
    let Some(RecordKey::Id(id)) = self.cursor_row().and_then(|r| self.resource.record_key(r))
    else {
      return;
    };
    match self.resource.delete(&self.client, id).await {
      Ok(()) => {
        self.status_msg = format!("Deleted #{id}");
        self.reload().await;
      }
      Err(e) => {
        tracing::warn!(resource = self.resource.title(), id, error = %e, "delete failed");
        self.status_msg = format!("Error: {e}");
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use crossterm::event::{KeyEventKind, KeyEventState};
  use serde_json::json;

  use super::*;
  use crate::client::ApiConfig;

  fn app() -> App {
    // Never contacted: these tests stay off the network.
    let client = ApiClient::new(ApiConfig {
      base_url:  "http://127.0.0.1:9".into(),
      admin_key: String::new(),
    })
    .unwrap();
    App::new(client)
  }

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
      code,
      modifiers: KeyModifiers::NONE,
      kind: KeyEventKind::Press,
      state: KeyEventState::NONE,
    }
  }

  #[tokio::test]
  async fn filter_narrows_rows() {
    let mut app = app();
    app.resource = Resource::Speakers;
    app.rows = vec![
      json!({ "id": 1, "name": "Ada Lovelace", "affiliation": "UCL" }),
      json!({ "id": 2, "name": "Alan Turing", "affiliation": "Manchester" }),
    ];
    app.handle_key(key(KeyCode::Char('/'))).await.unwrap();
    for c in "turing".chars() {
      app.handle_key(key(KeyCode::Char(c))).await.unwrap();
    }
    let rows = app.filtered_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], 2);
  }

  #[tokio::test]
  async fn add_then_escape_returns_to_idle() {
    let mut app = app();
    app.resource = Resource::Dates;
    app.form = Form::new(Resource::Dates.fields());

    app.handle_key(key(KeyCode::Char('a'))).await.unwrap();
    assert_eq!(app.form.phase, Phase::Editing(Mode::New));

    app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
    assert_eq!(app.form.values[0], "x");

    app.handle_key(key(KeyCode::Esc)).await.unwrap();
    assert_eq!(app.form.phase, Phase::Idle);
  }

  #[tokio::test]
  async fn edit_prefills_selected_row() {
    let mut app = app();
    app.resource = Resource::Fees;
    app.form = Form::new(Resource::Fees.fields());
    app.rows = vec![
      json!({ "id": 1, "category": "Student", "indianFee": "₹5,000", "internationalFee": "$100", "order": 0 }),
      json!({ "id": 2, "category": "Faculty", "indianFee": "₹8,000", "internationalFee": "$150", "order": 1 }),
    ];
    app.handle_key(key(KeyCode::Down)).await.unwrap();
    app.handle_key(key(KeyCode::Char('e'))).await.unwrap();

    assert_eq!(app.form.phase, Phase::Editing(Mode::Existing(RecordKey::Id(2))));
    assert_eq!(app.form.values, ["Faculty", "₹8,000", "$150", "1"]);
  }

  #[tokio::test]
  async fn submit_with_blank_required_field_stays_editing() {
    let mut app = app();
    app.resource = Resource::Contacts;
    app.form = Form::new(Resource::Contacts.fields());
    app.handle_key(key(KeyCode::Char('a'))).await.unwrap();

    let ctrl_s = KeyEvent { modifiers: KeyModifiers::CONTROL, ..key(KeyCode::Char('s')) };
    app.handle_key(ctrl_s).await.unwrap();

    assert_eq!(app.form.phase, Phase::Editing(Mode::New));
    assert_eq!(app.status_msg, "Error: Name is required");
  }

  #[tokio::test]
  async fn leaving_a_tab_drops_its_role_filter() {
    let mut app = app();
    app.reset_view(Resource::Committee);
    app.role_filter = Some(CommitteeRole::Tpc);
    app.filter = "ada".into();
    app.list_cursor = 3;

    app.reset_view(Resource::Fees);
    app.reset_view(Resource::Committee);

    assert_eq!(app.role_filter, None);
    assert!(app.filter.is_empty());
    assert_eq!(app.list_cursor, 0);
  }

  #[tokio::test]
  async fn settings_cannot_be_added_or_deleted() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('a'))).await.unwrap();
    assert!(!app.form.is_open());
    app.handle_key(key(KeyCode::Char('d'))).await.unwrap();
    assert_eq!(app.status_msg, "Settings cannot be deleted");
  }
}
