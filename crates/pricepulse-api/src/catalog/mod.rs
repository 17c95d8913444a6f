// Product catalog API: list, fetch, history, and create.

pub mod client;
pub mod models;

pub use client::CatalogClient;
