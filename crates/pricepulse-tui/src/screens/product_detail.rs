//! Product detail — latest price per store with the cheapest highlighted,
//! then the full price history.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Wrap};

use pricepulse_core::{HomeIntent, HomeSnapshot, PriceHistory, ProductDetail, Screen, StorePrice};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::price_fmt::{fmt_price, fmt_timestamp};

const NO_HISTORY: &str = "No history yet. Check back after the daily refresh.";

pub struct ProductDetailScreen {
    focused: bool,
    snapshot: Arc<HomeSnapshot>,
    /// First visible history row.
    history_offset: usize,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl ProductDetailScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            snapshot: Arc::new(HomeSnapshot::default()),
            history_offset: 0,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn detail(&self) -> Option<&ProductDetail> {
        self.snapshot.selected_product.as_deref()
    }

    fn history(&self) -> Option<&PriceHistory> {
        self.snapshot.price_history.as_deref()
    }

    fn history_len(&self) -> usize {
        self.history().map_or(0, |h| h.entries.len())
    }

    fn scroll(&mut self, delta: isize) {
        let max = self.history_len().saturating_sub(1);
        self.history_offset = self.history_offset.saturating_add_signed(delta).min(max);
    }

    fn block(&self, title: String) -> Block<'static> {
        Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            })
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let name = self.detail().map_or("Product", ProductDetail::name);
        let mut lines = vec![
            Line::from(vec![
                Span::styled("← ", theme::key_hint()),
                Span::styled(name.to_owned(), theme::title_style()),
            ]),
            Line::from(Span::styled(self.snapshot.disclaimer.clone(), theme::muted())),
        ];
        if let Some(message) = &self.snapshot.error_message {
            lines.push(Line::from(Span::styled(message.clone(), theme::error_text())));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        if self.snapshot.is_loading {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(" Loading prices...")
                .style(theme::muted())
                .throbber_style(theme::border_focused());
            frame.render_stateful_widget(throbber, area, &mut self.throbber_state.clone());
        }
    }

    fn render_latest(&self, frame: &mut Frame, area: Rect, detail: &ProductDetail) {
        let block = self.block(" Latest prices ".into());
        if detail.latest_prices.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("No prices scraped yet.", theme::muted())).block(block),
                area,
            );
            return;
        }

        let header = Row::new(["Store", "Price", "", "Last updated", "Link"])
            .style(theme::table_header());
        let rows = detail.latest_prices.iter().map(|price| {
            let best = detail.is_best(price);
            let (row_style, badge) = if best {
                (theme::best_price(), "Cheapest")
            } else {
                (theme::table_row(), "")
            };
            Row::new([
                Cell::from(store_label(price)),
                Cell::from(Span::styled(fmt_price(price.price), theme::price())),
                Cell::from(Span::styled(badge, theme::best_price())),
                Cell::from(Span::styled(fmt_timestamp(price.fetched_at), theme::muted())),
                Cell::from(price.product_url.clone()),
            ])
            .style(row_style)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Length(14),
                Constraint::Length(9),
                Constraint::Length(22),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(block);
        frame.render_widget(table, area);
    }

    fn render_history(&self, frame: &mut Frame, area: Rect) {
        let history = self.history();
        let title = match history.and_then(PriceHistory::lowest) {
            Some(low) => format!(
                " Price history · lowest {} on {} ",
                fmt_price(low.price),
                store_label(low)
            ),
            None => " Price history ".into(),
        };
        let block = self.block(title);

        let Some(history) = history.filter(|h| !h.is_empty()) else {
            frame.render_widget(
                Paragraph::new(Span::styled(NO_HISTORY, theme::muted())).block(block),
                area,
            );
            return;
        };

        let header = Row::new(["Store", "Price", "Fetched"]).style(theme::table_header());
        let rows = history.entries.iter().skip(self.history_offset).map(|entry| {
            Row::new([
                Cell::from(store_label(entry)),
                Cell::from(fmt_price(entry.price)),
                Cell::from(Span::styled(fmt_timestamp(entry.fetched_at), theme::muted())),
            ])
            .style(theme::table_row())
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Length(14),
                Constraint::Min(22),
            ],
        )
        .header(header)
        .block(block);
        frame.render_widget(table, area);
    }
}

/// Known stores get their proper name; anything else is shown verbatim.
fn store_label(price: &StorePrice) -> String {
    price
        .known_store()
        .map_or_else(|| price.store.clone(), |store| store.label().to_owned())
}

impl Component for ProductDetailScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let selected = self.snapshot.selected_id().cloned();
        let action = match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => Some(Action::Home(
                HomeIntent::Navigate(Screen::ProductList),
            )),
            KeyCode::Char('r') => selected.map(|id| Action::Home(HomeIntent::OpenDetail(id))),
            KeyCode::Char('h') => selected.map(|id| Action::Home(HomeIntent::LoadHistory(id))),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll(-1);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::HomeUpdated(snapshot) => {
                if snapshot.selected_id() != self.snapshot.selected_id() {
                    self.history_offset = 0;
                }
                self.snapshot = Arc::clone(snapshot);
                self.scroll(0);
            }
            Action::Tick if self.snapshot.is_loading => self.throbber_state.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let latest_height = self
            .detail()
            .map_or(3, |d| u16::try_from(d.latest_prices.len()).unwrap_or(u16::MAX))
            .saturating_add(3)
            .max(3);
        let [header, loading, latest, history] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(latest_height),
            Constraint::Min(3),
        ])
        .areas(area);

        self.render_header(frame, header);
        self.render_loading(frame, loading);

        if let Some(detail) = self.detail() {
            self.render_latest(frame, latest, detail);
            self.render_history(frame, history);
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn hints(&self) -> &'static str {
        "Esc back  ↑/↓ scroll history  r reload  h reload history  / search  q quit"
    }
}
