//! Graph API client for the managed page

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use mp_core::MetaConfig;

use crate::error::{MetaError, Result};
use crate::types::{CommentPayload, RecipientRef, ReplyBody, SendTextPayload, TextRef};

/// Untyped JSON object returned by every Graph API call
pub type JsonMap = Map<String, Value>;

/// Profile fields requested when the caller names none
pub const DEFAULT_PROFILE_FIELDS: &str = "first_name,last_name,profile_pic";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can deliver a reply to a Messenger user
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_reply(&self, reply: &ReplyBody) -> Result<JsonMap>;
}

/// Graph API client
#[derive(Clone)]
pub struct GraphApi {
    client: Client,
    base_url: String,
    api_version: String,
    page_id: String,
    access_token: String,
    verify_token: String,
}

impl GraphApi {
    /// Create a new Graph API client
    pub fn new(config: &MetaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MetaError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.graph_base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.trim_matches('/').to_string(),
            page_id: config.page_id.clone(),
            access_token: config.page_access_token.clone(),
            verify_token: config.verify_token.clone(),
        })
    }

    /// Page whose inbox and feed this client serves
    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            self.api_version,
            path.trim_start_matches('/')
        )
    }

    // -------------------------------------------------------------------------
    // Generic request helpers
    // -------------------------------------------------------------------------

    /// GET `path` with the page token and extra query parameters
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<JsonMap> {
        let request = self
            .client
            .get(self.url(path))
            .query(&[("access_token", self.access_token.as_str())])
            .query(query);

        self.execute("GET", path, request).await
    }

    /// POST a JSON body to `path`
    pub async fn post<T>(&self, path: &str, body: &T) -> Result<JsonMap>
    where
        T: Serialize + ?Sized,
    {
        let request = self
            .client
            .post(self.url(path))
            .query(&[("access_token", self.access_token.as_str())])
            .json(body);

        self.execute("POST", path, request).await
    }

    /// DELETE `path`
    pub async fn delete(&self, path: &str) -> Result<JsonMap> {
        let request = self
            .client
            .delete(self.url(path))
            .query(&[("access_token", self.access_token.as_str())]);

        self.execute("DELETE", path, request).await
    }

    /// Sends the request and decodes the body into a JSON object.
    ///
    /// Error statuses are not failures here: the platform reports them as a
    /// JSON `error` object, which is handed back to the caller as-is.
    async fn execute(&self, method: &str, path: &str, request: RequestBuilder) -> Result<JsonMap> {
        debug!("Graph API {} {}", method, path);

        let response = request.send().await.map_err(|e| {
            error!("Graph API {} {} failed: {}", method, path, e);
            MetaError::Request(e.to_string())
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            error!("Graph API {} {}: read body fail: {}", method, path, e);
            MetaError::ReadBody(e.to_string())
        })?;

        let value: Value = serde_json::from_slice(&body).map_err(|e| {
            error!("Graph API {} {}: format json fail: {}", method, path, e);
            MetaError::Decode(e.to_string())
        })?;

        let Value::Object(map) = value else {
            error!("Graph API {} {}: response is not a JSON object", method, path);
            return Err(MetaError::Decode("response is not a JSON object".to_string()));
        };

        if !status.is_success() {
            warn!("Graph API {} {} returned {}: {:?}", method, path, status, map.get("error"));
        }

        Ok(map)
    }

    // -------------------------------------------------------------------------
    // Page operations
    // -------------------------------------------------------------------------

    /// Posts of the managed page
    pub async fn page_feed(&self) -> Result<JsonMap> {
        let path = format!("{}/feed", self.page_id);
        self.get(&path, &[]).await
    }

    /// Comments under a post
    pub async fn page_comments(&self, feed_id: &str) -> Result<JsonMap> {
        let path = format!("{}/comments", graph_id(feed_id)?);
        self.get(&path, &[]).await
    }

    /// Publish a comment under a post
    pub async fn post_comment(&self, feed_id: &str, message: &str) -> Result<JsonMap> {
        let path = format!("{}/comments", graph_id(feed_id)?);
        let result = self.post(&path, &CommentPayload { message }).await?;
        info!("Comment posted on {}", feed_id);
        Ok(result)
    }

    /// Delete a comment
    pub async fn delete_comment(&self, comment_id: &str) -> Result<JsonMap> {
        let result = self.delete(graph_id(comment_id)?).await?;
        info!("Comment {} deleted", comment_id);
        Ok(result)
    }

    /// Send a plain text message to a user
    pub async fn send_text(&self, recipient_id: &str, text: &str) -> Result<JsonMap> {
        let payload = SendTextPayload {
            recipient: RecipientRef { id: recipient_id },
            message: TextRef { text },
            messaging_type: "RESPONSE",
        };

        debug!("Sending text to {}", recipient_id);
        self.post("me/messages", &payload).await
    }

    /// Public profile of a page-scoped user
    pub async fn user_profile(&self, user_id: &str, fields: Option<&str>) -> Result<JsonMap> {
        let fields = fields
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(DEFAULT_PROFILE_FIELDS);

        self.get(graph_id(user_id)?, &[("fields", fields)]).await
    }

    /// Answer the webhook subscription handshake.
    ///
    /// Returns the challenge to echo back when the mode and token match.
    pub fn verify_webhook(&self, mode: &str, token: &str, challenge: &str) -> Option<String> {
        if mode == "subscribe" && token == self.verify_token {
            info!("Webhook verified successfully");
            Some(challenge.to_string())
        } else {
            warn!("Webhook verification failed: invalid mode or token");
            None
        }
    }
}

#[async_trait]
impl MessageSender for GraphApi {
    async fn send_reply(&self, reply: &ReplyBody) -> Result<JsonMap> {
        debug!("Sending reply to {}", reply.recipient.id);
        self.post("me/messages", reply).await
    }
}

/// Graph object ids are ASCII letters, digits, `_` and `-` (`pageid_postid`)
fn graph_id(id: &str) -> Result<&str> {
    let id = id.trim();
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(id)
    } else {
        Err(MetaError::InvalidId(id.to_string()))
    }
}
