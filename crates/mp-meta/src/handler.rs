//! Webhook delivery handler for the managed page

use std::sync::Arc;

use tracing::{Instrument, debug, error, info, info_span};
use uuid::Uuid;

use mp_core::TriggerConfig;

use crate::api::MessageSender;
use crate::classifier::{Trigger, classify, replies_for};
use crate::types::{Messaging, WebhookPayload};

/// Counts gathered while processing one delivery
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub events: usize,
    pub replies_sent: usize,
    pub replies_failed: usize,
}

/// Classifies webhook events and sends the matching canned replies
pub struct WebhookHandler {
    sender: Arc<dyn MessageSender>,
    page_id: String,
    triggers: TriggerConfig,
}

impl WebhookHandler {
    /// Create a new webhook handler
    pub fn new(sender: Arc<dyn MessageSender>, page_id: &str, triggers: TriggerConfig) -> Self {
        Self {
            sender,
            page_id: page_id.to_string(),
            triggers,
        }
    }

    /// Process every messaging event of a delivery.
    ///
    /// Send failures are logged and counted; they never abort the delivery.
    pub async fn process_webhook(&self, payload: &WebhookPayload) -> DeliveryReport {
        let delivery_id = Uuid::new_v4();
        let span = info_span!("webhook", %delivery_id, object = %payload.object);

        async {
            let mut report = DeliveryReport::default();

            if !payload.is_page() {
                info!("Ignoring non-page webhook: {:?}", payload);
                return report;
            }

            for entry in &payload.entry {
                for messaging in &entry.messaging {
                    report.events += 1;
                    self.handle_messaging(messaging, &mut report).await;
                }
            }

            debug!("Delivery processed: {:?}", report);
            report
        }
        .instrument(span)
        .await
    }

    /// Handle a single messaging event
    async fn handle_messaging(&self, messaging: &Messaging, report: &mut DeliveryReport) {
        let trigger = classify(messaging, &self.page_id, &self.triggers);
        let sender_id = messaging.sender.id.as_str();

        match trigger {
            Trigger::NotForPage => {
                debug!("Ignoring event addressed to {}", messaging.recipient.id);
                return;
            }
            Trigger::Unrecognized => {
                debug!("No trigger matched for event from {}", sender_id);
                return;
            }
            Trigger::TestPhrase | Trigger::BookingPostback => {
                info!("{:?} received from {}", trigger, sender_id);
            }
        }

        for (index, reply) in replies_for(trigger, sender_id, &self.triggers)
            .iter()
            .enumerate()
        {
            match self.sender.send_reply(reply).await {
                Ok(response) => {
                    report.replies_sent += 1;
                    debug!("Reply {} sent to {}: {:?}", index + 1, sender_id, response);
                }
                Err(e) => {
                    report.replies_failed += 1;
                    error!("Error sending reply {} to {}: {}", index + 1, sender_id, e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::JsonMap;
    use crate::error::{MetaError, Result};
    use crate::templates;
    use crate::types::ReplyBody;
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    /// Records replies instead of sending them; optionally fails every Nth call
    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<ReplyBody>>,
        fail_on: Option<usize>,
    }

    #[async_trait]
    impl MessageSender for RecordingSender {
        async fn send_reply(&self, reply: &ReplyBody) -> Result<JsonMap> {
            let mut sent = self.sent.lock().await;
            sent.push(reply.clone());
            if self.fail_on == Some(sent.len()) {
                return Err(MetaError::Request("connection reset".to_string()));
            }
            Ok(JsonMap::new())
        }
    }

    fn payload(json: serde_json::Value) -> WebhookPayload {
        serde_json::from_value(json).unwrap()
    }

    fn text_event(recipient: &str, text: &str) -> WebhookPayload {
        payload(serde_json::json!({
            "object": "page",
            "entry": [{
                "id": "page123",
                "time": 1,
                "messaging": [{
                    "sender": {"id": "user1"},
                    "recipient": {"id": recipient},
                    "timestamp": 1,
                    "message": {"mid": "m.1", "text": text}
                }]
            }]
        }))
    }

    fn handler(sender: Arc<RecordingSender>) -> WebhookHandler {
        WebhookHandler::new(sender, "page123", TriggerConfig::default())
    }

    #[tokio::test]
    async fn test_test_phrase_sends_four_replies() {
        let sender = Arc::new(RecordingSender::default());
        let report = handler(sender.clone())
            .process_webhook(&text_event("page123", "這是測試用口令"))
            .await;

        assert_eq!(report.events, 1);
        assert_eq!(report.replies_sent, 4);

        let sent = sender.sent.lock().await;
        assert_eq!(sent.len(), 4);
        assert_eq!(sent[0], templates::promotion_headline("user1"));
        assert_eq!(sent[3], templates::room_options("user1", "立即預訂"));
    }

    #[tokio::test]
    async fn test_booking_postback_sends_deep_link() {
        let sender = Arc::new(RecordingSender::default());
        let delivery = payload(serde_json::json!({
            "object": "page",
            "entry": [{
                "id": "page123",
                "messaging": [{
                    "sender": {"id": "user7"},
                    "recipient": {"id": "page123"},
                    "postback": {"title": "立即預訂", "payload": "#double_room,#campaign", "mid": "m.2"}
                }]
            }]
        }));

        let report = handler(sender.clone()).process_webhook(&delivery).await;

        assert_eq!(report.replies_sent, 1);
        let sent = sender.sent.lock().await;
        assert_eq!(sent[0], templates::booking_deep_link("user7"));
    }

    #[tokio::test]
    async fn test_echo_is_not_answered() {
        let sender = Arc::new(RecordingSender::default());
        let report = handler(sender.clone())
            .process_webhook(&text_event("user1", "這是測試用口令"))
            .await;

        assert_eq!(report.events, 1);
        assert_eq!(report.replies_sent, 0);
        assert!(sender.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_unrelated_text_is_ignored() {
        let sender = Arc::new(RecordingSender::default());
        handler(sender.clone())
            .process_webhook(&text_event("page123", "hello"))
            .await;
        assert!(sender.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_non_page_object_is_ignored() {
        let sender = Arc::new(RecordingSender::default());
        let mut delivery = text_event("page123", "這是測試用口令");
        delivery.object = "instagram".to_string();

        let report = handler(sender.clone()).process_webhook(&delivery).await;

        assert_eq!(report, DeliveryReport::default());
        assert!(sender.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_send_failure_does_not_stop_remaining_replies() {
        let sender = Arc::new(RecordingSender {
            fail_on: Some(2),
            ..Default::default()
        });

        let report = handler(sender.clone())
            .process_webhook(&text_event("page123", "這是測試用口令"))
            .await;

        assert_eq!(report.replies_sent, 3);
        assert_eq!(report.replies_failed, 1);
        assert_eq!(sender.sent.lock().await.len(), 4);
    }

    #[tokio::test]
    async fn test_every_event_in_delivery_is_processed() {
        let sender = Arc::new(RecordingSender::default());
        let delivery = payload(serde_json::json!({
            "object": "page",
            "entry": [
                {"id": "page123", "messaging": [
                    {"sender": {"id": "a"}, "recipient": {"id": "page123"},
                     "postback": {"title": "立即預訂"}}
                ]},
                {"id": "page123", "messaging": [
                    {"sender": {"id": "b"}, "recipient": {"id": "page123"},
                     "postback": {"title": "立即預訂"}}
                ]}
            ]
        }));

        let report = handler(sender.clone()).process_webhook(&delivery).await;

        assert_eq!(report.events, 2);
        let sent = sender.sent.lock().await;
        assert_eq!(sent[0].recipient.id, "a");
        assert_eq!(sent[1].recipient.id, "b");
    }

    #[tokio::test]
    async fn test_empty_delivery() {
        let sender = Arc::new(RecordingSender::default());
        let report = handler(sender)
            .process_webhook(&payload(serde_json::json!({"object": "page", "entry": []})))
            .await;
        assert_eq!(report, DeliveryReport::default());
    }
}
