//! Add/edit dialog state.
//!
//! A form moves `Idle → Editing(New | Existing) → Submitting → Idle`. Values
//! are held as text while editing and converted to a JSON body only when the
//! user submits.

use confsite_core::RecordId;
use serde_json::{Map, Value};
use thiserror::Error;

// ─── Field descriptions ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  Text,
  /// Accepts newlines.
  Multiline,
  Integer,
  Toggle,
  Choice(&'static [&'static str]),
  /// Identifies the record; only editable while creating.
  Key,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
  /// JSON key in the request body.
  pub key:      &'static str,
  pub label:    &'static str,
  pub kind:     FieldKind,
  pub required: bool,
}

impl FieldSpec {
  fn default_text(&self) -> String {
    match self.kind {
      FieldKind::Toggle => "false".to_owned(),
      FieldKind::Choice(options) => options.first().copied().unwrap_or_default().to_owned(),
      _ => String::new(),
    }
  }
}

// ─── State machine ────────────────────────────────────────────────────────────

/// Which record a submission targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKey {
  Id(RecordId),
  Slug(String),
  Settings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
  New,
  Existing(RecordKey),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
  Idle,
  Editing(Mode),
  Submitting(Mode),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
  #[error("{0} is required")]
  Required(&'static str),

  #[error("{0} must be a whole number")]
  NotANumber(&'static str),

  #[error("no form is open")]
  NotEditing,
}

pub struct Form {
  pub fields: &'static [FieldSpec],
  pub values: Vec<String>,
  pub focus:  usize,
  pub phase:  Phase,
}

impl Form {
  pub fn new(fields: &'static [FieldSpec]) -> Self {
    Self {
      fields,
      values: fields.iter().map(FieldSpec::default_text).collect(),
      focus: 0,
      phase: Phase::Idle,
    }
  }

  pub fn is_open(&self) -> bool { self.phase != Phase::Idle }

  fn mode(&self) -> Option<&Mode> {
    match &self.phase {
      Phase::Idle => None,
      Phase::Editing(mode) | Phase::Submitting(mode) => Some(mode),
    }
  }

  pub fn is_new(&self) -> bool { self.mode() == Some(&Mode::New) }

  /// "Add": reset every field to its default.
  pub fn begin_new(&mut self) {
    self.values = self.fields.iter().map(FieldSpec::default_text).collect();
    self.phase = Phase::Editing(Mode::New);
    self.focus = self.first_editable();
  }

  /// "Edit": pre-populate from `record`.
  pub fn begin_edit(&mut self, key: RecordKey, record: &Value) {
    self.values = self
      .fields
      .iter()
      .map(|f| match record.get(f.key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => f.default_text(),
      })
      .collect();
    self.phase = Phase::Editing(Mode::Existing(key));
    self.focus = self.first_editable();
  }

  pub fn cancel(&mut self) { self.phase = Phase::Idle; }

  // ── Editing ───────────────────────────────────────────────────────────────

  pub fn is_editable(&self, index: usize) -> bool {
    match self.fields.get(index) {
      Some(f) if f.kind == FieldKind::Key => self.is_new(),
      Some(_) => true,
      None => false,
    }
  }

  fn first_editable(&self) -> usize {
    (0..self.fields.len())
      .find(|&i| self.is_editable(i))
      .unwrap_or(0)
  }

  pub fn focused(&self) -> Option<&FieldSpec> { self.fields.get(self.focus) }

  pub fn focus_next(&mut self) {
    let n = self.fields.len();
    for step in 1..=n {
      let i = (self.focus + step) % n;
      if self.is_editable(i) {
        self.focus = i;
        return;
      }
    }
  }

  pub fn focus_prev(&mut self) {
    let n = self.fields.len();
    for step in 1..=n {
      let i = (self.focus + n - step) % n;
      if self.is_editable(i) {
        self.focus = i;
        return;
      }
    }
  }

  /// Type `c` into the focused field. Toggles and choices cycle on space.
  pub fn input(&mut self, c: char) {
    let Some(spec) = self.focused().copied() else { return };
    match spec.kind {
      FieldKind::Toggle | FieldKind::Choice(_) => {
        if c == ' ' {
          self.cycle(true);
        }
      }
      FieldKind::Integer => {
        if c.is_ascii_digit() || (c == '-' && self.values[self.focus].is_empty()) {
          self.values[self.focus].push(c);
        }
      }
      _ => self.values[self.focus].push(c),
    }
  }

  pub fn newline(&mut self) {
    if self.focused().is_some_and(|f| f.kind == FieldKind::Multiline) {
      self.values[self.focus].push('\n');
    }
  }

  pub fn backspace(&mut self) {
    if let Some(spec) = self.focused()
      && !matches!(spec.kind, FieldKind::Toggle | FieldKind::Choice(_))
    {
      self.values[self.focus].pop();
    }
  }

  /// Step a toggle or choice field.
  pub fn cycle(&mut self, forward: bool) {
    let Some(spec) = self.focused().copied() else { return };
    let value = &mut self.values[self.focus];
    match spec.kind {
      FieldKind::Toggle => *value = (*value != "true").to_string(),
      FieldKind::Choice(options) if !options.is_empty() => {
        let i = options.iter().position(|o| *o == value.as_str()).unwrap_or(0);
        let next = if forward {
          (i + 1) % options.len()
        } else {
          (i + options.len() - 1) % options.len()
        };
        *value = options[next].to_owned();
      }
      _ => {}
    }
  }

  // ── Submission ────────────────────────────────────────────────────────────

  /// The first required field left blank, if any.
  pub fn missing_required(&self) -> Option<&'static str> {
    self
      .fields
      .iter()
      .zip(&self.values)
      .enumerate()
      .find(|(i, (f, v))| f.required && self.is_editable(*i) && v.trim().is_empty())
      .map(|(_, (f, _))| f.label)
  }

  /// Build the request body.
  ///
  /// New records omit blank optional fields so server defaults apply; edits
  /// send blanks so an optional field can be cleared.
  pub fn to_json(&self) -> Result<Value, FormError> {
    let new = self.is_new();
    let mut body = Map::new();
    for (spec, text) in self.fields.iter().zip(&self.values) {
      let value = match spec.kind {
        FieldKind::Key if !new => continue,
        FieldKind::Toggle => Value::Bool(text == "true"),
        FieldKind::Integer if text.trim().is_empty() => continue,
        FieldKind::Integer => {
          let n: i64 = text
            .trim()
            .parse()
            .map_err(|_| FormError::NotANumber(spec.label))?;
          Value::from(n)
        }
        _ if new && !spec.required && text.trim().is_empty() => continue,
        _ => Value::String(text.clone()),
      };
      body.insert(spec.key.to_owned(), value);
    }
    Ok(Value::Object(body))
  }

  /// `Editing → Submitting`. Returns what to send and where.
  pub fn begin_submit(&mut self) -> Result<(Mode, Value), FormError> {
    let Phase::Editing(mode) = &self.phase else {
      return Err(FormError::NotEditing);
    };
    let mode = mode.clone();
    if let Some(label) = self.missing_required() {
      return Err(FormError::Required(label));
    }
    let body = self.to_json()?;
    self.phase = Phase::Submitting(mode.clone());
    Ok((mode, body))
  }

  /// `Submitting → Idle` on success, back to `Editing` on failure.
  pub fn finish_submit(&mut self, ok: bool) {
    if let Phase::Submitting(mode) = &self.phase {
      self.phase = if ok { Phase::Idle } else { Phase::Editing(mode.clone()) };
    }
  }
}
