//! TUI rendering: orchestrates all panes.

pub mod form_dialog;
pub mod resource_list;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use serde_json::Value;

use crate::{app::App, form::Phase, resource::Resource};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let mut spans = vec![Span::styled(
    " confsite ",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  )];
  for (i, resource) in Resource::ALL.iter().enumerate() {
    let style = if *resource == app.resource {
      Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
      Style::default().fg(Color::Gray)
    };
    spans.push(Span::styled(format!(" {}:{} ", i + 1, resource.title()), style));
  }

  let used: u16 = spans.iter().map(|s| s.content.chars().count() as u16).sum();
  let right = format!("{date} ");
  let pad = area
    .width
    .saturating_sub(used)
    .saturating_sub(right.len() as u16);
  spans.push(Span::raw(" ".repeat(pad as usize)));
  spans.push(Span::styled(right, Style::default().fg(Color::DarkGray)));

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  // Split into left list pane (40%) and right detail pane (60%).
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
    .split(area);

  resource_list::draw(f, cols[0], app);

  if app.form.is_open() {
    form_dialog::draw(f, cols[1], app);
  } else {
    match app.cursor_row() {
      Some(row) => draw_record(f, cols[1], app, row),
      None => draw_empty_detail(f, cols[1]),
    }
  }
}

/// Read-only view of the selected record, one field per line.
fn draw_record(f: &mut Frame, area: Rect, app: &App, row: &Value) {
  let block = Block::default()
    .title(format!(" {} ", app.resource.row_label(row)))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let label_style = Style::default().fg(Color::Cyan);
  let lines: Vec<Line> = app
    .resource
    .fields()
    .iter()
    .map(|spec| {
      let value = match row.get(spec.key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "—".to_owned(),
        Some(other) => other.to_string(),
      };
      Line::from(vec![
        Span::styled(format!("{:<18}", spec.label), label_style),
        Span::raw(value),
      ])
    })
    .collect();

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn draw_empty_detail(f: &mut Frame, area: Rect) {
  let block = Block::default()
    .title(" Detail ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(Line::from(vec![Span::styled(
      "Nothing here yet. Press a to add.",
      Style::default().fg(Color::DarkGray),
    )])),
    inner,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match &app.form.phase {
    Phase::Submitting(_) => ("SAVING", "Waiting for the server…"),
    Phase::Editing(_) => (
      "EDIT",
      "Tab/↑↓ field  ←→/space cycle  Ctrl-S save  Esc cancel",
    ),
    Phase::Idle if app.filter_active => ("SEARCH", "Type to filter  Esc cancel  Enter done"),
    Phase::Idle if app.resource == Resource::Committee => (
      "NORMAL",
      "↑↓/jk move  Tab/1-7 switch  a add  e edit  d delete  f role  / search  q quit",
    ),
    Phase::Idle => (
      "NORMAL",
      "↑↓/jk move  Tab/1-7 switch  a add  e edit  d delete  r reload  / search  q quit",
    ),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), Style::default().fg(Color::DarkGray));

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
