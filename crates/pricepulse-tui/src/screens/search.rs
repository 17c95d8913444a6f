//! Search overlay — query and category fields over offer results from
//! every configured store.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use pricepulse_core::{ProductResult, SearchIntent, SearchSnapshot};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::form::{Form, FormEvent};

const QUERY: usize = 0;
const CATEGORY: usize = 1;

pub struct SearchScreen {
    focused: bool,
    snapshot: Arc<SearchSnapshot>,
    form: Form,
    /// The form is seeded from the first snapshot, then owned by the user.
    seeded: bool,
    /// First visible result line.
    scroll: u16,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl SearchScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            snapshot: Arc::new(SearchSnapshot::default()),
            form: Form::new(&["Search products", "Category"]),
            seeded: false,
            scroll: 0,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn result_lines(&self) -> Vec<Line<'static>> {
        self.snapshot
            .results
            .iter()
            .flat_map(|result| {
                let mut lines = result_lines(result);
                lines.push(Line::default());
                lines
            })
            .collect()
    }

    /// Field edits are mirrored into the store as they happen.
    fn form_action(&self, event: FormEvent) -> Option<Action> {
        match event {
            FormEvent::Edited(QUERY) => Some(Action::Search(SearchIntent::SetQuery(
                self.form.value(QUERY).to_owned(),
            ))),
            FormEvent::Edited(CATEGORY) => Some(Action::Search(SearchIntent::SetCategory(
                self.form.value(CATEGORY).to_owned(),
            ))),
            FormEvent::Cancelled => Some(Action::CloseSearch),
            FormEvent::Edited(_) | FormEvent::Moved | FormEvent::Submitted | FormEvent::Ignored => {
                None
            }
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        if self.snapshot.is_loading {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(" Searching stores...")
                .style(theme::muted())
                .throbber_style(theme::border_focused());
            frame.render_stateful_widget(throbber, area, &mut self.throbber_state.clone());
        } else if let Some(message) = &self.snapshot.error_message {
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {message}"), theme::error_text())),
                area,
            );
        }
    }

    fn render_results(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" Results ({}) ", self.snapshot.results.len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        if self.snapshot.results.is_empty() {
            let text = if self.snapshot.is_loading {
                ""
            } else {
                "No results yet. Press Enter to search."
            };
            frame.render_widget(
                Paragraph::new(Span::styled(text, theme::muted())).block(block),
                area,
            );
            return;
        }

        frame.render_widget(
            Paragraph::new(self.result_lines())
                .block(block)
                .scroll((self.scroll, 0)),
            area,
        );
    }
}

/// Title, price summary, then one line per store offer.
fn result_lines(result: &ProductResult) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            result.title.clone(),
            theme::title_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  Now ", theme::key_hint()),
            Span::styled(result.price_history.current.clone(), theme::price()),
            Span::styled("  ·  30-day low ", theme::key_hint()),
            Span::styled(result.price_history.lowest_30d.clone(), theme::best_price()),
        ]),
    ];
    lines.extend(result.offers.iter().map(|offer| {
        let mut spans = vec![
            Span::styled(format!("  {:<10}", offer.store), theme::table_row()),
            Span::styled(format!("{:>10}", offer.price), theme::price()),
            Span::styled(format!("  {}", offer.shipping), theme::muted()),
        ];
        if !offer.offer.trim().is_empty() {
            spans.push(Span::styled(format!("  {}", offer.offer), theme::offer()));
        }
        Line::from(spans)
    }));
    lines
}

impl Component for SearchScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Enter => Some(Action::Search(SearchIntent::Search)),
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(5);
                None
            }
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(5);
                None
            }
            _ => {
                let event = self.form.handle_key(key);
                self.form_action(event)
            }
        };
        Ok(action)
    }

    fn handle_paste(&mut self, text: &str) -> Result<Option<Action>> {
        let event = self.form.paste(text);
        Ok(self.form_action(event))
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SearchUpdated(snapshot) => {
                if !self.seeded {
                    self.form.set_value(QUERY, snapshot.query.clone());
                    self.form.set_value(CATEGORY, snapshot.category.clone());
                    self.seeded = true;
                }
                if !Arc::ptr_eq(&snapshot.results, &self.snapshot.results) {
                    self.scroll = 0;
                }
                self.snapshot = Arc::clone(snapshot);
            }
            Action::Tick if self.snapshot.is_loading => self.throbber_state.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [form, status, results] = Layout::vertical([
            Constraint::Length(self.form.height()),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .areas(area);

        self.form.render(frame, form, self.focused);
        self.render_status(frame, status);
        self.render_results(frame, results);
    }

    fn captures_input(&self) -> bool {
        true
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn hints(&self) -> &'static str {
        "Enter search  Tab switch field  PgUp/PgDn scroll  Esc close  Ctrl+C quit"
    }
}
