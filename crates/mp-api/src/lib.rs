//! mp-api: HTTP API for the Meta page backend
//!
//! Webhook endpoints plus thin proxies over the page's Graph API.
//! Built with axum for async HTTP handling.

pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod server;

pub use error::{ApiError, Result};
pub use server::{AppState, app, start_server};
