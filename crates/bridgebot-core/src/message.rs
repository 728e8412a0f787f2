use bridgebot_content::Content;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::source::MessageSource;
use crate::system::SystemEvent;

/// A user as described by the originating platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            username: None,
            avatar_url: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Who sent a message: a structured user, or one of the literal roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sender {
    User(User),
    Role(SenderRole),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderRole {
    System,
    Bot,
    Unknown,
}

impl Sender {
    pub fn system() -> Self {
        Sender::Role(SenderRole::System)
    }
    pub fn bot() -> Self {
        Sender::Role(SenderRole::Bot)
    }
    pub fn unknown() -> Self {
        Sender::Role(SenderRole::Unknown)
    }
}

impl From<User> for Sender {
    fn from(user: User) -> Self {
        Sender::User(user)
    }
}

/// One inbound or outbound event flowing through the bridge.
///
/// The payload enum carries everything that varies by message type, so a
/// value can never mix payload fields across types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub sender: Sender,
    pub source: MessageSource,

    /// Fallback rendering used when a destination cannot handle the
    /// payload's native type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<Content>,

    /// Adaptor-specific metadata that survives the trip untouched.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,

    #[serde(flatten)]
    pub payload: MessagePayload,
}

impl Message {
    pub fn new(
        id: impl Into<String>,
        timestamp: DateTime<Utc>,
        sender: Sender,
        source: MessageSource,
        payload: MessagePayload,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp,
            sender,
            source,
            alt: None,
            extra: Map::new(),
            payload,
        }
    }

    pub fn with_alt(mut self, alt: Content) -> Self {
        self.alt = Some(alt);
        self
    }

    /// Short payload-type label for log fields.
    pub fn kind(&self) -> &'static str {
        match self.payload {
            MessagePayload::Text(_) => "text",
            MessagePayload::Media(_) => "media",
            MessagePayload::Location(_) => "location",
            MessagePayload::System(_) => "system",
        }
    }

    /// Synthesize the text message a destination receives when it lacks
    /// the capability for this payload: identity fields are preserved,
    /// the payload becomes the `alt` content. `None` when no `alt` is set.
    pub fn alt_fallback(&self) -> Option<Message> {
        let alt = self.alt.clone()?;
        Some(Message {
            id: self.id.clone(),
            timestamp: self.timestamp,
            sender: self.sender.clone(),
            source: self.source.clone(),
            alt: None,
            extra: Map::new(),
            payload: MessagePayload::Text(TextPayload {
                content: alt,
                mentions: Vec::new(),
            }),
        })
    }
}

/// The type-discriminated payload of a [`Message`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessagePayload {
    Text(TextPayload),
    Media(MediaPayload),
    Location(LocationPayload),
    System(SystemEvent),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPayload {
    pub content: Content,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentions: Vec<User>,
}

impl TextPayload {
    pub fn new(content: Content) -> Self {
        Self {
            content,
            mentions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Sticker,
    Image,
    Video,
    Audio,
    File,
}

/// One media attachment: what it is plus where the platform serves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub kind: MediaKind,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaPayload {
    /// Attachments in the order the platform delivered them.
    pub items: Vec<MediaItem>,
    /// Total size in bytes, when the platform reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<Content>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentions: Vec<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPayload {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Horizontal accuracy radius in meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}
