//! mp-core: shared pieces of the Meta page backend
//!
//! Configuration loading and the result-code table used by every
//! HTTP response envelope.

pub mod config;
pub mod error;
pub mod status;

pub use config::{Config, MetaConfig, ServerConfig, TriggerConfig};
pub use error::{Error, Result};
pub use status::ResultCode;
