//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use pricepulse_core::{CatalogRepository, HomeStore, SearchIntent, SearchRepository, SearchStore};

use crate::action::Action;
use crate::component::Component;
use crate::data_bridge::spawn_data_bridge;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App<C, S> {
    home: HomeStore<C>,
    search: SearchStore<S>,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Catalog screen named by the latest home snapshot.
    home_screen: ScreenId,
    /// Search overlay covers the catalog screen while open.
    search_open: bool,
    running: bool,
    help_visible: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    cancel: CancellationToken,
}

impl<C: CatalogRepository, S: SearchRepository> App<C, S> {
    pub fn new(home: HomeStore<C>, search: SearchStore<S>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let mut screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens().into_iter().collect();

        let home_screen = ScreenId::from(&home.snapshot().screen);
        if let Some(screen) = screens.get_mut(&home_screen) {
            screen.set_focused(true);
        }

        Self {
            home,
            search,
            screens,
            home_screen,
            search_open: false,
            running: true,
            help_visible: false,
            action_tx,
            action_rx,
            cancel: CancellationToken::new(),
        }
    }

    fn active_screen(&self) -> ScreenId {
        if self.search_open {
            ScreenId::Search
        } else {
            self.home_screen
        }
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let bridge = tokio::spawn(spawn_data_bridge(
            self.home.subscribe(),
            self.search.subscribe(),
            self.action_tx.clone(),
            self.cancel.clone(),
        ));

        let mut events = EventReader::new(
            Duration::from_millis(100), // spinner speed
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next terminal event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Paste(text) => {
                    if let Some(action) = self.handle_paste(&text)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render | Event::Resize => self.action_tx.send(Action::Render)?,
            }

            // 3. Drain everything queued, snapshots from the bridge included
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;
                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        self.cancel.cancel();
        let _ = bridge.await;
        info!("TUI event loop ended");
        Ok(())
    }

    /// Global keys first, then the active screen. Screens that are typing
    /// into a field only give up Ctrl+C.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        let active = self.active_screen();
        let typing = self
            .screens
            .get(&active)
            .is_some_and(|screen| screen.captures_input());

        if !typing && key.modifiers == KeyModifiers::NONE {
            match key.code {
                KeyCode::Char('q') => return Ok(Some(Action::Quit)),
                KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
                KeyCode::Char('/') => return Ok(Some(Action::OpenSearch)),
                _ => {}
            }
        }

        if let Some(screen) = self.screens.get_mut(&active) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    /// Pasted text goes to the active screen unless help is covering it.
    fn handle_paste(&mut self, text: &str) -> Result<Option<Action>> {
        if self.help_visible {
            return Ok(None);
        }
        let active = self.active_screen();
        match self.screens.get_mut(&active) {
            Some(screen) => screen.handle_paste(text),
            None => Ok(None),
        }
    }

    /// Move focus from `from` to whatever is active now.
    fn refocus(&mut self, from: ScreenId) {
        let to = self.active_screen();
        if from == to {
            return;
        }
        debug!("switching screen: {from} → {to}");
        if let Some(screen) = self.screens.get_mut(&from) {
            screen.set_focused(false);
        }
        if let Some(screen) = self.screens.get_mut(&to) {
            screen.set_focused(true);
        }
    }

    /// Send `action` to every screen; snapshots and ticks keep hidden
    /// screens current.
    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Home(intent) => {
                debug!(?intent, "home intent");
                self.home.dispatch(intent.clone());
            }

            Action::Search(intent) => {
                debug!(?intent, "search intent");
                self.search.dispatch(intent.clone());
            }

            Action::OpenSearch => {
                let from = self.active_screen();
                self.search_open = true;
                self.refocus(from);
                self.search.dispatch(SearchIntent::LoadDemoIfNeeded);
            }

            Action::CloseSearch => {
                let from = self.active_screen();
                self.search_open = false;
                self.refocus(from);
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::HomeUpdated(snapshot) => {
                let from = self.active_screen();
                self.home_screen = ScreenId::from(&snapshot.screen);
                self.refocus(from);
                self.broadcast(action)?;
            }

            Action::SearchUpdated(_) | Action::Tick => self.broadcast(action)?,

            // Render is handled in the main loop
            Action::Render => {}
        }
        Ok(())
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let [title, content, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_title_bar(frame, title);
        if let Some(screen) = self.screens.get(&self.active_screen()) {
            screen.render(frame, content);
        }
        self.render_status_bar(frame, status);

        if self.help_visible {
            Self::render_help_overlay(frame, content);
        }
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" ◆ PricePulse ", theme::title_style()),
            Span::styled("› ", theme::key_hint()),
            Span::styled(self.active_screen().label(), theme::key_hint_key()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let hints = self
            .screens
            .get(&self.active_screen())
            .map_or("", |screen| screen.hints());
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(hints, theme::key_hint()),
            Span::styled("  │ ? help", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let [column] = Layout::horizontal([Constraint::Length(56)])
            .flex(Flex::Center)
            .areas(area);
        let [help_area] = Layout::vertical([Constraint::Length(16)])
            .flex(Flex::Center)
            .areas(column);

        frame.render_widget(Clear, help_area);
        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let entry = |key: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<12}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };
        let help_text = vec![
            Line::from(""),
            entry("↑/↓ j/k", "Move selection / scroll"),
            entry("Enter", "Open product / submit"),
            entry("Esc", "Back / close"),
            entry("a", "Add a product to track"),
            entry("r", "Refresh"),
            entry("h", "Reload price history"),
            entry("Tab", "Next form field"),
            entry("Ctrl+S", "Submit the add-product form"),
            entry("/", "Search offers across stores"),
            entry("q / Ctrl+C", "Quit"),
            Line::from(""),
            Line::from(Span::styled("  Esc or ? to close", theme::key_hint())),
        ];
        frame.render_widget(Paragraph::new(help_text), inner);
    }
}
