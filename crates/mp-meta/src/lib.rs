//! mp-meta: Messenger Platform integration for the managed page
//!
//! Graph API client, webhook data structures, the trigger classifier
//! and the canned reply templates it answers with.

pub mod api;
pub mod classifier;
pub mod error;
pub mod handler;
pub mod templates;
pub mod types;

pub use api::{GraphApi, JsonMap, MessageSender};
pub use classifier::{Trigger, classify, replies_for};
pub use error::{MetaError, Result};
pub use handler::{DeliveryReport, WebhookHandler};
pub use types::{ReplyBody, WebhookPayload};
