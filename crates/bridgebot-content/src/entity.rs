use serde::{Deserialize, Serialize};

/// The kinds of inline formatting a destination renderer can be asked to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
    Pre,
    TextLink,
}

/// A span of formatting located by offset/length over plain text.
///
/// Offsets and lengths are measured in Unicode scalar values (`char`s) of
/// the plain-text derivation. Destinations that address text in UTF-16
/// code units must convert on their side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub offset: usize,
    pub length: usize,
    /// Target URL — present only for [`EntityKind::TextLink`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Language hint — present for [`EntityKind::Code`] and
    /// [`EntityKind::Pre`], empty string when the markup carried none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl MessageEntity {
    pub fn new(kind: EntityKind, offset: usize, length: usize) -> Self {
        Self {
            kind,
            offset,
            length,
            url: None,
            language: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Plain text plus the ordered entity list extracted from one content value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEntities {
    pub text: String,
    pub entities: Vec<MessageEntity>,
}
