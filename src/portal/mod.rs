//! Portal access: HTTP client, markup adapter, and the combined client.
//!
//! The adapter is the only code that knows the portal's HTML structure; the
//! client owns fetching, politeness delays, and error mapping. Both are
//! driven by [`PortalConfig`], so tests point them at a local fake portal.

mod adapter;
mod client;
mod config;
mod http_client;

pub use adapter::PortalAdapter;
pub use client::PortalClient;
pub use config::{default_valid_statuses, PortalConfig, SelectorConfig};
pub use http_client::{parse_content_disposition_filename, HttpClient, HttpResponse};
