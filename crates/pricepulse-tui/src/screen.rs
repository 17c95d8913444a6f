//! Screen identifiers.

use std::fmt;

use pricepulse_core::Screen;

/// Identifies each top-level TUI screen. The catalog screens follow the
/// home snapshot; `Search` is an overlay the app opens on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Login,
    Register,
    Products,
    Detail,
    Search,
}

impl ScreenId {
    pub fn label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
            Self::Products => "Products",
            Self::Detail => "Product",
            Self::Search => "Search",
        }
    }
}

impl From<&Screen> for ScreenId {
    fn from(screen: &Screen) -> Self {
        match screen {
            Screen::Login => Self::Login,
            Screen::Register => Self::Register,
            Screen::ProductList => Self::Products,
            Screen::ProductDetail(_) => Self::Detail,
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use pricepulse_core::ProductId;

    use super::*;

    #[test]
    fn every_home_screen_has_a_component() {
        assert_eq!(ScreenId::from(&Screen::Login), ScreenId::Login);
        assert_eq!(ScreenId::from(&Screen::Register), ScreenId::Register);
        assert_eq!(ScreenId::from(&Screen::ProductList), ScreenId::Products);
        assert_eq!(
            ScreenId::from(&Screen::ProductDetail(ProductId::from("p1"))),
            ScreenId::Detail
        );
    }
}
