//! Maps a messaging event to the canned replies it should receive

use mp_core::TriggerConfig;

use crate::templates;
use crate::types::{Messaging, ReplyBody};

/// What an inbound event asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Addressed to someone other than the page, e.g. the page's own echoes
    NotForPage,
    /// Message text matched the test phrase
    TestPhrase,
    /// The booking postback button was clicked
    BookingPostback,
    /// Nothing to answer
    Unrecognized,
}

/// Classify one messaging event.
///
/// Message text is checked before the postback title.
pub fn classify(messaging: &Messaging, page_id: &str, triggers: &TriggerConfig) -> Trigger {
    if messaging.recipient.id != page_id {
        return Trigger::NotForPage;
    }

    if messaging.text() == Some(triggers.test_phrase.as_str()) {
        Trigger::TestPhrase
    } else if messaging.postback_title() == Some(triggers.booking_label.as_str()) {
        Trigger::BookingPostback
    } else {
        Trigger::Unrecognized
    }
}

/// Replies to send for `trigger`, in delivery order
pub fn replies_for(trigger: Trigger, sender_id: &str, triggers: &TriggerConfig) -> Vec<ReplyBody> {
    match trigger {
        Trigger::TestPhrase => vec![
            templates::promotion_headline(sender_id),
            templates::booking_ad(sender_id, &triggers.booking_label),
            templates::room_gallery(sender_id),
            templates::room_options(sender_id, &triggers.booking_label),
        ],
        Trigger::BookingPostback => vec![templates::booking_deep_link(sender_id)],
        Trigger::NotForPage | Trigger::Unrecognized => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Message, Postback, User};

    const PAGE_ID: &str = "page123";

    fn event(recipient: &str, text: Option<&str>, postback: Option<&str>) -> Messaging {
        Messaging {
            sender: User::new("user1"),
            recipient: User::new(recipient),
            timestamp: None,
            message: text.map(|t| Message {
                mid: "mid.1".to_string(),
                text: Some(t.to_string()),
                is_echo: false,
            }),
            postback: postback.map(|title| Postback {
                title: title.to_string(),
                payload: "#double_room".to_string(),
                mid: "mid.2".to_string(),
            }),
        }
    }

    #[test]
    fn test_event_for_other_recipient_is_ignored() {
        let triggers = TriggerConfig::default();
        let messaging = event("someone-else", Some(&triggers.test_phrase), None);
        assert_eq!(classify(&messaging, PAGE_ID, &triggers), Trigger::NotForPage);
    }

    #[test]
    fn test_test_phrase() {
        let triggers = TriggerConfig::default();
        let messaging = event(PAGE_ID, Some("這是測試用口令"), None);
        assert_eq!(classify(&messaging, PAGE_ID, &triggers), Trigger::TestPhrase);
    }

    #[test]
    fn test_phrase_must_match_exactly() {
        let triggers = TriggerConfig::default();
        let messaging = event(PAGE_ID, Some("這是測試用口令 "), None);
        assert_eq!(classify(&messaging, PAGE_ID, &triggers), Trigger::Unrecognized);
    }

    #[test]
    fn test_booking_postback() {
        let triggers = TriggerConfig::default();
        let messaging = event(PAGE_ID, None, Some("立即預訂"));
        assert_eq!(classify(&messaging, PAGE_ID, &triggers), Trigger::BookingPostback);
    }

    #[test]
    fn test_other_postback_is_unrecognized() {
        let triggers = TriggerConfig::default();
        let messaging = event(PAGE_ID, None, Some("Get Started"));
        assert_eq!(classify(&messaging, PAGE_ID, &triggers), Trigger::Unrecognized);
    }

    #[test]
    fn test_text_wins_over_postback() {
        let triggers = TriggerConfig::default();
        let messaging = event(PAGE_ID, Some("這是測試用口令"), Some("立即預訂"));
        assert_eq!(classify(&messaging, PAGE_ID, &triggers), Trigger::TestPhrase);
    }

    #[test]
    fn test_empty_event_is_unrecognized() {
        let triggers = TriggerConfig::default();
        assert_eq!(
            classify(&event(PAGE_ID, None, None), PAGE_ID, &triggers),
            Trigger::Unrecognized
        );
    }

    #[test]
    fn test_test_phrase_replies_in_order() {
        let triggers = TriggerConfig::default();
        let replies = replies_for(Trigger::TestPhrase, "user1", &triggers);

        assert_eq!(
            replies,
            vec![
                templates::promotion_headline("user1"),
                templates::booking_ad("user1", "立即預訂"),
                templates::room_gallery("user1"),
                templates::room_options("user1", "立即預訂"),
            ]
        );
        assert!(replies.iter().all(|r| r.recipient.id == "user1"));
    }

    #[test]
    fn test_booking_postback_reply() {
        let triggers = TriggerConfig::default();
        let replies = replies_for(Trigger::BookingPostback, "user1", &triggers);
        assert_eq!(replies, vec![templates::booking_deep_link("user1")]);
    }

    #[test]
    fn test_no_replies_for_ignored_events() {
        let triggers = TriggerConfig::default();
        assert!(replies_for(Trigger::NotForPage, "user1", &triggers).is_empty());
        assert!(replies_for(Trigger::Unrecognized, "user1", &triggers).is_empty());
    }
}
