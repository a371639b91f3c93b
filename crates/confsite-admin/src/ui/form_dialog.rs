//! Add/edit form: right panel while a form is open.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
  app::App,
  form::{FieldKind, Mode, Phase, RecordKey},
};

/// Render the open form into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let form = &app.form;
  let resource = app.resource.title();
  let title = match &form.phase {
    Phase::Editing(Mode::New) | Phase::Submitting(Mode::New) => format!(" New {resource} "),
    Phase::Editing(Mode::Existing(key)) | Phase::Submitting(Mode::Existing(key)) => match key {
      RecordKey::Id(id) => format!(" Edit {resource} #{id} "),
      RecordKey::Slug(slug) => format!(" Edit page {slug} "),
      RecordKey::Settings => " Edit settings ".to_owned(),
    },
    Phase::Idle => format!(" {resource} "),
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines: Vec<Line> = Vec::new();
  for (i, (spec, value)) in form.fields.iter().zip(&form.values).enumerate() {
    let focused = i == form.focus;
    let editable = form.is_editable(i);

    let marker = if spec.required { "*" } else { " " };
    let label_style = if focused {
      Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
    } else if editable {
      Style::default().fg(Color::Cyan)
    } else {
      Style::default().fg(Color::DarkGray)
    };

    let shown = match spec.kind {
      FieldKind::Toggle => if value == "true" { "[x]" } else { "[ ]" }.to_owned(),
      FieldKind::Choice(_) => format!("‹ {value} ›"),
      _ if focused => format!("{value}_"),
      _ => value.clone(),
    };

    let mut value_lines = shown.split('\n');
    let first = value_lines.next().unwrap_or_default().to_owned();
    lines.push(Line::from(vec![
      Span::styled(format!("{marker}{:<18}", spec.label), label_style),
      Span::raw(first),
    ]));
    for rest in value_lines {
      lines.push(Line::from(vec![
        Span::raw(" ".repeat(19)),
        Span::raw(rest.to_owned()),
      ]));
    }
  }

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
