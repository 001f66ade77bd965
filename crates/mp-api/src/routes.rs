//! Route definitions
//!
//! Defines all HTTP API endpoints.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::{
    delete_comment, health, page_comments, page_feed, post_comment, receive_webhook, send_message,
    user_profile, verify_webhook,
};
use crate::server::AppState;

/// Create the API router
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Webhook handshake and deliveries
        .route("/api/v1/meta_hook", get(verify_webhook).post(receive_webhook))
        // Page content proxies
        .route("/api/v1/meta_page/feed", get(page_feed))
        .route(
            "/api/v1/meta_page/comment",
            get(page_comments).post(post_comment).delete(delete_comment),
        )
        .route("/api/v1/meta_page/message", post(send_message))
        // User lookups
        .route("/api/v1/meta_user/profile", get(user_profile))
}
