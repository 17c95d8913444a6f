pub mod form;
pub mod price_fmt;
