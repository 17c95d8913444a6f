//! Product list — tracked products, the add-product form, loading and
//! error states, and the backend's disclaimer.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};

use pricepulse_core::{HomeIntent, HomeSnapshot, Product};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::form::{Form, FormEvent};
use crate::widgets::price_fmt::{fmt_date, fmt_store_count};

const NAME: usize = 0;
const IMAGE_URL: usize = 1;
const AMAZON_URL: usize = 2;
const FLIPKART_URL: usize = 3;

const MISSING_FIELDS: &str = "Product name, Amazon URL and Flipkart URL are required.";

pub struct ProductListScreen {
    focused: bool,
    snapshot: Arc<HomeSnapshot>,
    table_state: TableState,
    /// Kept across open/close; cleared only by an accepted submission.
    form: Form,
    form_open: bool,
    form_hint: Option<&'static str>,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl ProductListScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            snapshot: Arc::new(HomeSnapshot::default()),
            table_state: TableState::default(),
            form: Form::new(&[
                "Product name",
                "Image URL (optional)",
                "Amazon product URL",
                "Flipkart product URL",
            ]),
            form_open: false,
            form_hint: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn products(&self) -> &[Product] {
        &self.snapshot.products
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn select(&mut self, idx: usize) {
        let len = self.products().len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(idx.min(len - 1)));
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let idx = self.selected_index().saturating_add_signed(delta);
        self.select(idx);
    }

    /// Hand the form to the store if it is complete; otherwise keep every
    /// field as typed and say what is missing.
    fn submit(&mut self) -> Option<Action> {
        let name = self.form.value(NAME).trim();
        let amazon_url = self.form.value(AMAZON_URL).trim();
        let flipkart_url = self.form.value(FLIPKART_URL).trim();
        if name.is_empty() || amazon_url.is_empty() || flipkart_url.is_empty() {
            self.form_hint = Some(MISSING_FIELDS);
            return None;
        }

        let image_url = self.form.value(IMAGE_URL).trim();
        let intent = HomeIntent::AddProduct {
            name: name.to_owned(),
            image_url: (!image_url.is_empty()).then(|| image_url.to_owned()),
            amazon_url: amazon_url.to_owned(),
            flipkart_url: flipkart_url.to_owned(),
        };

        self.form.clear();
        self.form_open = false;
        self.form_hint = None;
        Some(Action::Home(intent))
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return self.submit();
        }
        match self.form.handle_key(key) {
            FormEvent::Submitted => self.submit(),
            FormEvent::Cancelled => {
                self.form_open = false;
                self.form_hint = None;
                None
            }
            FormEvent::Edited(_) => {
                self.form_hint = None;
                None
            }
            FormEvent::Moved | FormEvent::Ignored => None,
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        if self.snapshot.is_loading {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(" Fetching prices...")
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

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Add product to track ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [fields, footer] =
            Layout::vertical([Constraint::Length(self.form.height()), Constraint::Length(1)])
                .areas(inner);
        self.form.render(frame, fields, true);

        let footer_line = match self.form_hint {
            Some(hint) => Line::from(Span::styled(hint, theme::error_text())),
            None => Line::from(vec![
                Span::styled(" Ctrl+S ", theme::key_hint_key()),
                Span::styled("Track Product  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("close", theme::key_hint()),
            ]),
        };
        frame.render_widget(Paragraph::new(footer_line), footer);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" Products ({}) ", self.products().len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused && !self.form_open {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        if self.products().is_empty() {
            let text = if self.snapshot.is_loading {
                ""
            } else {
                "No products tracked yet. Press a to add one."
            };
            frame.render_widget(
                Paragraph::new(Span::styled(text, theme::muted())).block(block),
                area,
            );
            return;
        }

        let header = Row::new(["Name", "Stores", "Created"]).style(theme::table_header());
        let rows = self.products().iter().map(|product| {
            Row::new([
                Cell::from(product.name.clone()),
                Cell::from(fmt_store_count(product.store_count())),
                Cell::from(Span::styled(
                    format!("Created {}", fmt_date(product.created_at)),
                    theme::muted(),
                )),
            ])
            .style(theme::table_row())
        });

        let table = Table::new(
            rows,
            [
                Constraint::Min(24),
                Constraint::Length(10),
                Constraint::Length(22),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(theme::table_selected())
        .highlight_symbol("▸ ");

        frame.render_stateful_widget(table, area, &mut self.table_state.clone());
    }
}

impl Component for ProductListScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.form_open {
            return Ok(self.handle_form_key(key));
        }

        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.select(0);
                None
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.select(usize::MAX);
                None
            }
            KeyCode::Enter => self
                .products()
                .get(self.selected_index())
                .map(|product| Action::Home(HomeIntent::OpenDetail(product.id.clone()))),
            KeyCode::Char('r') => Some(Action::Home(HomeIntent::RefreshList)),
            KeyCode::Char('a') => {
                self.form_open = true;
                None
            }
            _ => None,
        };
        Ok(action)
    }

    /// Paste only lands in the add-product form; the table ignores it.
    fn handle_paste(&mut self, text: &str) -> Result<Option<Action>> {
        if self.form_open && matches!(self.form.paste(text), FormEvent::Edited(_)) {
            self.form_hint = None;
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::HomeUpdated(snapshot) => {
                self.snapshot = Arc::clone(snapshot);
                self.select(self.selected_index());
            }
            Action::Tick if self.snapshot.is_loading => self.throbber_state.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let form_height = if self.form_open {
            self.form.height() + 3
        } else {
            0
        };
        let [disclaimer, status, form, table] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(form_height),
            Constraint::Min(3),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Span::styled(self.snapshot.disclaimer.as_str(), theme::muted()))
                .wrap(Wrap { trim: true }),
            disclaimer,
        );
        self.render_status(frame, status);
        if self.form_open {
            self.render_form(frame, form);
        }
        self.render_table(frame, table);
    }

    fn captures_input(&self) -> bool {
        self.form_open
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn hints(&self) -> &'static str {
        if self.form_open {
            "Tab next field  Ctrl+S track  Esc close"
        } else {
            "↑/↓ select  Enter open  a add product  r refresh  / search  q quit"
        }
    }
}
