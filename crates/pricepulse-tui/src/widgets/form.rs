//! Single-line text form used by the auth, add-product and search screens.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::theme;

/// Rows each field takes, borders included.
const FIELD_HEIGHT: u16 = 3;

struct Field {
    label: &'static str,
    value: String,
    masked: bool,
}

/// What a key press did to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// The value of field `n` changed.
    Edited(usize),
    Moved,
    /// Enter on the last field.
    Submitted,
    Cancelled,
    Ignored,
}

pub struct Form {
    fields: Vec<Field>,
    focus: usize,
}

impl Form {
    pub fn new(labels: &[&'static str]) -> Self {
        Self {
            fields: labels
                .iter()
                .map(|&label| Field {
                    label,
                    value: String::new(),
                    masked: false,
                })
                .collect(),
            focus: 0,
        }
    }

    /// Render field `idx` as bullets (passwords).
    pub fn masked(mut self, idx: usize) -> Self {
        if let Some(field) = self.fields.get_mut(idx) {
            field.masked = true;
        }
        self
    }

    pub fn value(&self, idx: usize) -> &str {
        self.fields.get(idx).map_or("", |f| f.value.as_str())
    }

    pub fn set_value(&mut self, idx: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(idx) {
            field.value = value.into();
        }
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Empty every field and focus the first.
    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focus = 0;
    }

    /// Total rows needed to render every field.
    pub fn height(&self) -> u16 {
        u16::try_from(self.fields.len())
            .unwrap_or(u16::MAX)
            .saturating_mul(FIELD_HEIGHT)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        let last = self.fields.len().saturating_sub(1);
        match key.code {
            KeyCode::Esc => FormEvent::Cancelled,
            KeyCode::Enter if self.focus >= last => FormEvent::Submitted,
            KeyCode::Enter | KeyCode::Tab | KeyCode::Down => {
                self.focus = if self.focus >= last { 0 } else { self.focus + 1 };
                FormEvent::Moved
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = if self.focus == 0 { last } else { self.focus - 1 };
                FormEvent::Moved
            }
            KeyCode::Backspace => match self
                .fields
                .get_mut(self.focus)
                .and_then(|field| field.value.pop())
            {
                Some(_) => FormEvent::Edited(self.focus),
                None => FormEvent::Ignored,
            },
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                match self.fields.get_mut(self.focus) {
                    Some(field) => {
                        field.value.push(c);
                        FormEvent::Edited(self.focus)
                    }
                    None => FormEvent::Ignored,
                }
            }
            _ => FormEvent::Ignored,
        }
    }

    /// Append pasted text to the focused field. Fields are single-line, so
    /// line breaks are dropped.
    pub fn paste(&mut self, text: &str) -> FormEvent {
        let text: String = text.chars().filter(|c| !c.is_control()).collect();
        match self.fields.get_mut(self.focus) {
            Some(field) if !text.is_empty() => {
                field.value.push_str(&text);
                FormEvent::Edited(self.focus)
            }
            _ => FormEvent::Ignored,
        }
    }

    fn display_value(&self, idx: usize) -> String {
        match self.fields.get(idx) {
            Some(field) if field.masked => "•".repeat(field.value.chars().count()),
            Some(field) => field.value.clone(),
            None => String::new(),
        }
    }

    /// Draw the fields stacked top to bottom. `active` shows the cursor.
    pub fn render(&self, frame: &mut Frame, area: Rect, active: bool) {
        let rows = Layout::vertical(
            self.fields
                .iter()
                .map(|_| Constraint::Length(FIELD_HEIGHT))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(area);

        for (idx, (field, row)) in self.fields.iter().zip(rows.iter()).enumerate() {
            let focused = active && idx == self.focus;
            let block = Block::default()
                .title(format!(" {} ", field.label))
                .title_style(if focused {
                    theme::title_style()
                } else {
                    theme::key_hint()
                })
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if focused {
                    theme::border_focused()
                } else {
                    theme::border_default()
                });

            let mut spans = vec![Span::styled(self.display_value(idx), theme::table_row())];
            if focused {
                spans.push(Span::styled("▏", theme::border_focused()));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)).block(block), *row);
        }
    }
}
