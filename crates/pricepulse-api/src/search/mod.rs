// Product search API: one keyed endpoint returning per-store offers.

pub mod client;
pub mod models;

pub use client::SearchClient;
