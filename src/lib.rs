//! Cumponidori - VIA/VAS portal harvesting proxy.
//!
//! Scrapes the Italian environmental-assessment portal: project search,
//! procedure-link discovery, paginated document listings, and proxied
//! document downloads, exposed as a JSON API and a bulk-harvest CLI.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod portal;
pub mod server;
pub mod services;
pub mod utils;
