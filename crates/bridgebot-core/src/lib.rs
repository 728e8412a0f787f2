//! Shared data model and configuration for the bridge.

pub mod config;
pub mod error;
pub mod message;
pub mod source;
pub mod system;

pub use bridgebot_content::{Content, ContentFormat};
pub use config::{BaseUrl, BridgeConfig};
pub use error::ConfigError;
pub use message::{
    LocationPayload, MediaItem, MediaKind, MediaPayload, Message, MessagePayload, Sender,
    SenderRole, TextPayload, User,
};
pub use source::{MessageSource, SourceScope};
pub use system::SystemEvent;
