use serde::{Deserialize, Serialize};

use crate::convert::html_to_markdown;
use crate::entity::TextEntities;
use crate::error::ContentError;
use crate::extract::entities_from_html;
use crate::render::markdown_to_html;

/// Which markup dialect a [`Content`]'s raw text is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    Html,
    Markdown,
}

/// An immutable format-tagged rich-text value.
///
/// Only `raw` + `format` are stored. Every other representation is derived
/// on demand; nothing is cached or mutated, so any derivation called twice
/// on the same value returns byte-identical output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    raw: String,
    format: ContentFormat,
}

impl Content {
    pub fn new(raw: impl Into<String>, format: ContentFormat) -> Self {
        Self {
            raw: raw.into(),
            format,
        }
    }

    /// Shorthand for a Markdown-tagged value.
    pub fn markdown(raw: impl Into<String>) -> Self {
        Self::new(raw, ContentFormat::Markdown)
    }

    /// Shorthand for an HTML-tagged value.
    pub fn html(raw: impl Into<String>) -> Self {
        Self::new(raw, ContentFormat::Html)
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn format(&self) -> ContentFormat {
        self.format
    }

    /// The HTML representation: identity when already HTML, otherwise the
    /// rendered Markdown, trimmed.
    pub fn to_html(&self) -> Result<String, ContentError> {
        match self.format {
            ContentFormat::Html => Ok(self.raw.clone()),
            ContentFormat::Markdown => Ok(markdown_to_html(&self.raw).trim().to_string()),
        }
    }

    /// The Markdown representation: identity when already Markdown,
    /// otherwise converted from HTML, trimmed.
    pub fn to_markdown(&self) -> Result<String, ContentError> {
        match self.format {
            ContentFormat::Markdown => Ok(self.raw.clone()),
            ContentFormat::Html => html_to_markdown(&self.raw),
        }
    }

    /// Plain text plus the ordered inline-entity list.
    pub fn to_message_entities(&self) -> Result<TextEntities, ContentError> {
        entities_from_html(&self.to_html()?)
    }

    /// The plain-text component alone, trimmed.
    pub fn to_plain_text(&self) -> Result<String, ContentError> {
        Ok(self.to_message_entities()?.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;

    #[test]
    fn html_representation_is_identity_for_html() {
        let content = Content::html("<b>keep me exactly</b>");
        assert_eq!(content.to_html().unwrap(), "<b>keep me exactly</b>");
    }

    #[test]
    fn markdown_representation_is_identity_for_markdown() {
        let content = Content::markdown("**as written**");
        assert_eq!(content.to_markdown().unwrap(), "**as written**");
    }

    #[test]
    fn markdown_renders_to_trimmed_html() {
        let content = Content::markdown("**bold**");
        assert_eq!(content.to_html().unwrap(), "<p><strong>bold</strong></p>");
    }

    #[test]
    fn html_converts_to_markdown() {
        let content = Content::html("<p><strong>bold</strong> and <em>italic</em></p>");
        assert_eq!(content.to_markdown().unwrap(), "**bold** and *italic*");
    }

    #[test]
    fn entity_contract_for_mixed_markdown() {
        let content = Content::markdown("**bold** and `code`");
        let out = content.to_message_entities().unwrap();

        assert_eq!(out.text, "bold and code");
        assert_eq!(out.entities[0].kind, EntityKind::Bold);
        assert_eq!(out.entities[0].offset, 0);
        assert_eq!(out.entities[0].length, 4);
        assert_eq!(out.entities[1].kind, EntityKind::Code);
        assert_eq!(out.entities[1].offset, 9);
        assert_eq!(out.entities[1].length, 4);
    }

    #[test]
    fn plain_text_strips_all_markup() {
        let content = Content::markdown("a [link](https://example.com) and ~~strike~~");
        assert_eq!(content.to_plain_text().unwrap(), "a link and strike");
    }

    #[test]
    fn derivations_are_referentially_transparent() {
        let content = Content::markdown("**bold** with [link](https://example.com) and `code`");

        assert_eq!(content.to_html().unwrap(), content.to_html().unwrap());
        assert_eq!(content.to_markdown().unwrap(), content.to_markdown().unwrap());
        assert_eq!(
            content.to_message_entities().unwrap(),
            content.to_message_entities().unwrap()
        );
        assert_eq!(
            content.to_plain_text().unwrap(),
            content.to_plain_text().unwrap()
        );
    }

    #[test]
    fn serde_round_trip() {
        let content = Content::markdown("hi");
        let json = serde_json::to_string(&content).unwrap();
        assert_eq!(json, r#"{"raw":"hi","format":"markdown"}"#);
        let back: Content = serde_json::from_str(&json).unwrap();
        assert_eq!(back, content);
    }
}
