//! Login and Register screens. Accounts are not validated yet: submitting
//! either form goes straight to the product list.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use pricepulse_core::{HomeIntent, Screen};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::form::{Form, FormEvent};

const PANEL_WIDTH: u16 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthKind {
    Login,
    Register,
}

pub struct AuthScreen {
    kind: AuthKind,
    form: Form,
    focused: bool,
}

impl AuthScreen {
    pub fn login() -> Self {
        Self {
            kind: AuthKind::Login,
            form: Form::new(&["Email", "Password"]).masked(1),
            focused: false,
        }
    }

    pub fn register() -> Self {
        Self {
            kind: AuthKind::Register,
            form: Form::new(&["Full name", "Email", "Password"]).masked(2),
            focused: false,
        }
    }

    fn title(&self) -> &'static str {
        match self.kind {
            AuthKind::Login => "Welcome back",
            AuthKind::Register => "Create your account",
        }
    }

    fn subtitle(&self) -> &'static str {
        match self.kind {
            AuthKind::Login => "Log in to compare prices with true-cost clarity.",
            AuthKind::Register => "Track prices, wishlists, and alerts across all stores.",
        }
    }

    fn go(screen: Screen) -> Action {
        Action::Home(HomeIntent::Navigate(screen))
    }
}

impl Component for AuthScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(match (self.kind, key.code) {
                (AuthKind::Login, KeyCode::Char('r')) => Some(Self::go(Screen::Register)),
                (AuthKind::Register, KeyCode::Char('l')) => Some(Self::go(Screen::Login)),
                _ => None,
            });
        }

        Ok(match (self.form.handle_key(key), self.kind) {
            (FormEvent::Submitted, _) => Some(Self::go(Screen::ProductList)),
            (FormEvent::Cancelled, AuthKind::Register) => Some(Self::go(Screen::Login)),
            _ => None,
        })
    }

    fn handle_paste(&mut self, text: &str) -> Result<Option<Action>> {
        self.form.paste(text);
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let height = self.form.height() + 6;
        let [column] = Layout::horizontal([Constraint::Length(PANEL_WIDTH)])
            .flex(Flex::Center)
            .areas(area);
        let [panel] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(column);

        let block = Block::default()
            .title(" PricePulse ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let [heading, form_area, _, action] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(self.form.height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let heading_text = vec![
            Line::from(Span::styled(self.title(), theme::title_style())),
            Line::from(Span::styled(self.subtitle(), theme::muted())),
        ];
        frame.render_widget(
            Paragraph::new(heading_text).wrap(Wrap { trim: true }),
            heading,
        );

        self.form.render(frame, form_area, self.focused);

        let primary = match self.kind {
            AuthKind::Login => "Login",
            AuthKind::Register => "Register",
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" Enter ", theme::key_hint_key()),
                Span::styled(primary, theme::key_hint()),
            ])),
            action,
        );
    }

    fn captures_input(&self) -> bool {
        true
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn hints(&self) -> &'static str {
        match self.kind {
            AuthKind::Login => "Tab next field  Enter login  Ctrl+R create an account  Ctrl+C quit",
            AuthKind::Register => "Tab next field  Enter register  Esc back to login  Ctrl+C quit",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn press(screen: &mut AuthScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn navigated_to(action: Option<Action>) -> Option<Screen> {
        match action {
            Some(Action::Home(HomeIntent::Navigate(screen))) => Some(screen),
            _ => None,
        }
    }

    #[test]
    fn login_submits_to_product_list() {
        let mut screen = AuthScreen::login();
        assert_eq!(navigated_to(press(&mut screen, KeyCode::Char('q'))), None);
        assert_eq!(navigated_to(press(&mut screen, KeyCode::Enter)), None);
        assert_eq!(
            navigated_to(press(&mut screen, KeyCode::Enter)),
            Some(Screen::ProductList)
        );
    }

    #[test]
    fn paste_fills_the_focused_field() {
        let mut screen = AuthScreen::login();
        assert!(screen.handle_paste("me@example.com").unwrap().is_none());
        assert_eq!(screen.form.value(0), "me@example.com");
    }

    #[test]
    fn login_links_to_register() {
        let mut screen = AuthScreen::login();
        let action = screen
            .handle_key_event(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(navigated_to(action), Some(Screen::Register));
    }

    #[test]
    fn register_escapes_back_to_login() {
        let mut screen = AuthScreen::register();
        assert_eq!(
            navigated_to(press(&mut screen, KeyCode::Esc)),
            Some(Screen::Login)
        );
    }

    #[test]
    fn enter_walks_every_register_field_before_submitting() {
        let mut screen = AuthScreen::register();
        assert_eq!(navigated_to(press(&mut screen, KeyCode::Enter)), None);
        assert_eq!(navigated_to(press(&mut screen, KeyCode::Enter)), None);
        assert_eq!(
            navigated_to(press(&mut screen, KeyCode::Enter)),
            Some(Screen::ProductList)
        );
    }
}
