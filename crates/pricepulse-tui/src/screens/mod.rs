//! Screen implementations. Each screen is a top-level Component.

pub mod auth;
pub mod product_detail;
pub mod product_list;
pub mod search;

use crate::component::Component;
use crate::screen::ScreenId;

pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Login, Box::new(auth::AuthScreen::login())),
        (ScreenId::Register, Box::new(auth::AuthScreen::register())),
        (
            ScreenId::Products,
            Box::new(product_list::ProductListScreen::new()),
        ),
        (
            ScreenId::Detail,
            Box::new(product_detail::ProductDetailScreen::new()),
        ),
        (ScreenId::Search, Box::new(search::SearchScreen::new())),
    ]
}
