//! HTTP API handlers
//!
//! Thin wrappers that validate input, call the Graph API client and wrap
//! the result in the response envelope.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, info};

use mp_meta::{JsonMap, WebhookPayload};

use crate::error::{ApiError, Result};
use crate::response::Envelope;
use crate::server::AppState;

// ============================================================================
// Request types
// ============================================================================

/// Subscription handshake parameters
#[derive(Debug, Default, Deserialize)]
pub struct HubQuery {
    #[serde(rename = "hub.mode", default)]
    pub mode: String,
    #[serde(rename = "hub.verify_token", default)]
    pub verify_token: String,
    #[serde(rename = "hub.challenge", default)]
    pub challenge: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub feed_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentIdQuery {
    pub comment_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub user_id: Option<String>,
    pub fields: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub feed_id: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    #[serde(default)]
    pub recipient: String,
    #[serde(default)]
    pub text: String,
}

/// Non-blank value of a required parameter
fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::InvalidRequest(format!("{} is required", name))),
    }
}

/// Unwraps a JSON body, reporting malformed input as a parameter error
fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(value)| value)
        .map_err(|e| ApiError::InvalidRequest(e.body_text()))
}

// ============================================================================
// Handler functions
// ============================================================================

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Webhook subscription handshake.
///
/// The platform expects the bare challenge, so no envelope here.
pub async fn verify_webhook(
    State(state): State<AppState>,
    Query(query): Query<HubQuery>,
) -> Response {
    match state
        .graph
        .verify_webhook(&query.mode, &query.verify_token, &query.challenge)
    {
        Some(challenge) => (StatusCode::OK, challenge).into_response(),
        None => (StatusCode::FORBIDDEN, "Forbidden").into_response(),
    }
}

/// Webhook delivery: classify events and send canned replies
pub async fn receive_webhook(
    State(state): State<AppState>,
    body: std::result::Result<Json<WebhookPayload>, JsonRejection>,
) -> Result<Envelope<WebhookPayload>> {
    let payload = json_body(body)?;
    debug!("Webhook received: {:?}", payload);

    let report = state.webhook.process_webhook(&payload).await;
    info!(
        "Webhook handled: {} events, {} replies sent, {} failed",
        report.events, report.replies_sent, report.replies_failed
    );

    Ok(Envelope(payload))
}

/// Posts of the managed page
pub async fn page_feed(State(state): State<AppState>) -> Result<Envelope<JsonMap>> {
    Ok(Envelope(state.graph.page_feed().await?))
}

/// Comments under a post
pub async fn page_comments(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Envelope<JsonMap>> {
    let feed_id = required(query.feed_id.as_deref(), "feed_id")?;
    Ok(Envelope(state.graph.page_comments(feed_id).await?))
}

/// Publish a comment under a post
pub async fn post_comment(
    State(state): State<AppState>,
    body: std::result::Result<Json<CommentRequest>, JsonRejection>,
) -> Result<Envelope<JsonMap>> {
    let req = json_body(body)?;
    let feed_id = required(Some(req.feed_id.as_str()), "feed_id")?;
    let message = required(Some(req.message.as_str()), "message")?;

    Ok(Envelope(state.graph.post_comment(feed_id, message).await?))
}

/// Delete a comment
pub async fn delete_comment(
    State(state): State<AppState>,
    Query(query): Query<CommentIdQuery>,
) -> Result<Envelope<JsonMap>> {
    let comment_id = required(query.comment_id.as_deref(), "comment_id")?;
    Ok(Envelope(state.graph.delete_comment(comment_id).await?))
}

/// Send a text message to a user
pub async fn send_message(
    State(state): State<AppState>,
    body: std::result::Result<Json<MessageRequest>, JsonRejection>,
) -> Result<Envelope<JsonMap>> {
    let req = json_body(body)?;
    let recipient = required(Some(req.recipient.as_str()), "recipient")?;
    let text = required(Some(req.text.as_str()), "text")?;

    Ok(Envelope(state.graph.send_text(recipient, text).await?))
}

/// Profile of a page-scoped user
pub async fn user_profile(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> Result<Envelope<JsonMap>> {
    let user_id = required(query.user_id.as_deref(), "user_id")?;
    Ok(Envelope(
        state
            .graph
            .user_profile(user_id, query.fields.as_deref())
            .await?,
    ))
}
