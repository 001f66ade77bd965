//! Messenger Platform data structures
//!
//! Inbound webhook deliveries and the outbound generic-template replies.

use serde::{Deserialize, Serialize};

// =============================================================================
// Inbound webhook
// =============================================================================

/// Top-level webhook delivery
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub entry: Vec<Entry>,
}

impl WebhookPayload {
    /// True for deliveries about a page (as opposed to instagram, user, ...)
    pub fn is_page(&self) -> bool {
        self.object == "page"
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    #[serde(default)]
    pub messaging: Vec<Messaging>,
}

/// One messaging event inside an entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Messaging {
    #[serde(default)]
    pub sender: User,
    #[serde(default)]
    pub recipient: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postback: Option<Postback>,
}

impl Messaging {
    /// Free text of the message, if any
    pub fn text(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.text.as_deref())
    }

    /// Title of the clicked postback button, if any
    pub fn postback_title(&self) -> Option<&str> {
        self.postback.as_ref().map(|p| p.title.as_str())
    }
}

/// Page-scoped id wrapper used for both sender and recipient
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub mid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_echo: bool,
}

/// Button click delivered as a postback
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Postback {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub payload: String,
    #[serde(default)]
    pub mid: String,
}

// =============================================================================
// Outbound replies
// =============================================================================

/// Reply sent to `/me/messages`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyBody {
    pub recipient: User,
    pub message: ReplyMessage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub attachment_type: String,
    pub payload: GenericTemplatePayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericTemplatePayload {
    pub template_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<Element>,
}

/// One card of a generic template carousel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_action: Option<Action>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
}

impl Element {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn default_action(mut self, action: Action) -> Self {
        self.default_action = Some(action);
        self
    }

    pub fn button(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    #[serde(rename = "type")]
    pub button_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl Button {
    /// Button that opens a URL
    pub fn web_url(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            button_type: "web_url".to_string(),
            url: Some(url.into()),
            title: title.into(),
            payload: None,
        }
    }

    /// Button that comes back as a postback event
    pub fn postback(title: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            button_type: "postback".to_string(),
            url: None,
            title: title.into(),
            payload: Some(payload.into()),
        }
    }
}

/// Action taken when the element itself is tapped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub messenger_extensions: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webview_height_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_url: Option<String>,
}

impl Action {
    pub fn web_url(url: impl Into<String>) -> Self {
        Self {
            action_type: "web_url".to_string(),
            url: url.into(),
            messenger_extensions: false,
            webview_height_ratio: None,
            fallback_url: None,
        }
    }

    pub fn webview_height_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.webview_height_ratio = Some(ratio.into());
        self
    }
}

// =============================================================================
// Plain text send
// =============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct SendTextPayload<'a> {
    pub recipient: RecipientRef<'a>,
    pub message: TextRef<'a>,
    pub messaging_type: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecipientRef<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TextRef<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CommentPayload<'a> {
    pub message: &'a str,
}
