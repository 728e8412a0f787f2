use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::message::{Message, User};

/// Platform events that are not chat content themselves.
///
/// Closed enumeration: every event carries its own payload shape, and
/// anything a platform reports that has no mapping lands in `Unknown`
/// with the raw payload attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "system_type", content = "payload", rename_all = "snake_case")]
pub enum SystemEvent {
    UserJoined {
        user: User,
    },
    UserLeft {
        user: User,
    },
    UserBanned {
        user: User,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    UserUnbanned {
        user: User,
    },

    SourceNameChanged {
        old_name: String,
        new_name: String,
    },
    SourceTopicChanged {
        old_topic: String,
        new_topic: String,
    },
    SourceAvatarChanged {
        #[serde(skip_serializing_if = "Option::is_none")]
        old_avatar_url: Option<String>,
        new_avatar_url: String,
    },

    MessagePinned {
        message: Box<Message>,
    },
    MessageUnpinned {
        message: Box<Message>,
    },
    MessageRedacted {
        message_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    MessageEdited {
        message_id: String,
        old_content: String,
        new_content: String,
    },

    Reply {
        message: Box<Message>,
    },
    ReactionAdded {
        message_id: String,
        reaction: String,
    },
    ReactionRemoved {
        message_id: String,
        reaction: String,
    },

    CallStarted {
        call_id: String,
        participants: Vec<User>,
    },
    CallEnded {
        call_id: String,
        duration_ms: u64,
    },

    BoostAdded {
        user: User,
        level: u32,
    },

    ThreadCreated {
        thread_id: String,
        creator: User,
        parent_id: String,
    },
    InviteSent {
        inviter: User,
        invitee: User,
        source_id: String,
    },

    Unknown {
        raw: Value,
    },
}
