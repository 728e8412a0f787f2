use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Where a message originated. The scope is closed; platform-specific
/// extras ride along in the flattened map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageSource {
    #[serde(flatten)]
    pub scope: SourceScope,
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceScope {
    Private,
    Group {
        group_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        group_name: Option<String>,
    },
    Channel {
        channel_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        channel_name: Option<String>,
    },
    Forum {
        forum_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        thread_id: Option<String>,
    },
}

impl MessageSource {
    pub fn private() -> Self {
        SourceScope::Private.into()
    }

    pub fn group(group_id: impl Into<String>) -> Self {
        SourceScope::Group {
            group_id: group_id.into(),
            group_name: None,
        }
        .into()
    }

    pub fn channel(channel_id: impl Into<String>) -> Self {
        SourceScope::Channel {
            channel_id: channel_id.into(),
            channel_name: None,
        }
        .into()
    }

    pub fn forum(forum_id: impl Into<String>) -> Self {
        SourceScope::Forum {
            forum_id: forum_id.into(),
            thread_id: None,
        }
        .into()
    }
}

impl From<SourceScope> for MessageSource {
    fn from(scope: SourceScope) -> Self {
        Self {
            scope,
            extra: Map::new(),
        }
    }
}
