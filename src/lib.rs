//! Charm listing scraper for csgoskins.gg.
//!
//! One page in, deduplicated charm records out, each with a guessed Steam
//! Community Market link. See `routes` for the HTTP surface.

pub mod config;
pub mod dashboard;
pub mod dedup;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod routes;
pub mod scrape;
pub mod steam;
pub mod types;
pub mod view;
