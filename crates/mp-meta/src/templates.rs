//! Canned generic-template replies

use crate::types::{
    Action, Attachment, Button, Element, GenericTemplatePayload, ReplyBody, ReplyMessage, User,
};

/// Site opened by the booking deep link
pub const BOOKING_SITE_URL: &str = "https://chatbot-poc-n3cm.vercel.app/";

const ROOM_IMAGE_URL: &str = "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcS9h9_oJPww83HRiwVd771_JqtXPpm8vytzdg&s";
const LOBBY_IMAGE_URL: &str = "https://images.unsplash.com/photo-1566073771259-6a8506099945";
const POOL_IMAGE_URL: &str = "https://images.unsplash.com/photo-1571896349842-33c89424de2d";
const PROMOTION_URL: &str = "https://www.shopee.com";
const MORE_INFO_URL: &str = "https://www.google.com";

/// Postback payload carried by the booking buttons
pub const BOOKING_PAYLOAD: &str = "#double_room,#campaign";

/// Empty generic template addressed to `recipient_id`
pub fn general_reply(recipient_id: &str) -> ReplyBody {
    ReplyBody {
        recipient: User::new(recipient_id),
        message: ReplyMessage {
            attachment: Some(Attachment {
                attachment_type: "template".to_string(),
                payload: GenericTemplatePayload {
                    template_type: "generic".to_string(),
                    elements: Vec::new(),
                },
            }),
        },
    }
}

/// Generic template holding `elements` in order
pub fn carousel(recipient_id: &str, elements: impl IntoIterator<Item = Element>) -> ReplyBody {
    let mut reply = general_reply(recipient_id);
    if let Some(attachment) = reply.message.attachment.as_mut() {
        attachment.payload.elements.extend(elements);
    }
    reply
}

/// Generic template with a single element
pub fn general_reply_with(recipient_id: &str, element: Element) -> ReplyBody {
    carousel(recipient_id, [element])
}

/// Text-only card announcing the weekly promotion
pub fn promotion_headline(recipient_id: &str) -> ReplyBody {
    general_reply_with(
        recipient_id,
        Element::new("本週住房優惠開跑！").subtitle("週一～週四入住雙人房最低 68 折"),
    )
}

/// Weekday room promotion with image, booking postback and a web link
pub fn booking_ad(recipient_id: &str, booking_label: &str) -> ReplyBody {
    general_reply_with(
        recipient_id,
        Element::new("Weekday room promotion")
            .subtitle("Double room from 68% of standard price; only 8 rooms left.")
            .image_url(ROOM_IMAGE_URL)
            .default_action(Action::web_url(PROMOTION_URL))
            .button(Button::postback(booking_label, BOOKING_PAYLOAD))
            .button(Button::web_url("View more", MORE_INFO_URL)),
    )
}

/// Image-only carousel of the property
pub fn room_gallery(recipient_id: &str) -> ReplyBody {
    carousel(
        recipient_id,
        [
            Element::new("Double room").image_url(ROOM_IMAGE_URL),
            Element::new("Lobby").image_url(LOBBY_IMAGE_URL),
            Element::new("Pool").image_url(POOL_IMAGE_URL),
        ],
    )
}

/// Room choices, each card carrying three buttons
pub fn room_options(recipient_id: &str, booking_label: &str) -> ReplyBody {
    let room = |title: &str, subtitle: &str, image: &str, payload: &str| {
        Element::new(title)
            .subtitle(subtitle)
            .image_url(image)
            .button(Button::postback(booking_label, payload))
            .button(Button::web_url("Room details", BOOKING_SITE_URL))
            .button(Button::web_url("View more", MORE_INFO_URL))
    };

    carousel(
        recipient_id,
        [
            room(
                "Double room",
                "Weekday stays from 68% of standard price",
                ROOM_IMAGE_URL,
                BOOKING_PAYLOAD,
            ),
            room(
                "Family room",
                "Sleeps four, breakfast included",
                LOBBY_IMAGE_URL,
                "#family_room,#campaign",
            ),
        ],
    )
}

/// Deep link into the booking site, opened full height
pub fn booking_deep_link(recipient_id: &str) -> ReplyBody {
    general_reply_with(
        recipient_id,
        Element::new("👉 查看優惠詳情與房型")
            .subtitle(BOOKING_SITE_URL)
            .default_action(Action::web_url(BOOKING_SITE_URL).webview_height_ratio("full")),
    )
}
