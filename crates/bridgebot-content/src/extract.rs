//! Inline-entity extraction from an HTML tree.
//!
//! Depth-first traversal accumulating a plain-text buffer. Text nodes
//! append their literal text; an element's entity is emitted after its
//! children have been visited, so nested lengths are already accounted
//! for. Zero-length elements emit nothing.

use ego_tree::NodeRef;
use scraper::node::{Element, Node};
use scraper::Html;

use crate::entity::{EntityKind, MessageEntity, TextEntities};
use crate::error::ContentError;
use crate::MAX_NESTING;

/// Walk `html` and return its plain text (trimmed) plus the entity list,
/// sorted ascending by offset with ties keeping traversal order.
///
/// Offsets and lengths are counted in `char`s of the untrimmed buffer.
pub fn entities_from_html(html: &str) -> Result<TextEntities, ContentError> {
    let doc = Html::parse_fragment(html);

    let mut buf = String::new();
    let mut chars = 0usize;
    let mut entities = Vec::new();
    walk(doc.tree.root(), 0, &mut buf, &mut chars, &mut entities)?;

    // Stable sort: equal offsets keep the order entities were discovered in.
    entities.sort_by_key(|e| e.offset);

    Ok(TextEntities {
        text: buf.trim().to_string(),
        entities,
    })
}

fn walk(
    node: NodeRef<'_, Node>,
    depth: usize,
    buf: &mut String,
    chars: &mut usize,
    entities: &mut Vec<MessageEntity>,
) -> Result<(), ContentError> {
    if depth > MAX_NESTING {
        return Err(ContentError::Conversion(format!(
            "markup nested deeper than {MAX_NESTING} levels"
        )));
    }

    match node.value() {
        Node::Text(text) => {
            let s: &str = &text.text;
            buf.push_str(s);
            *chars += s.chars().count();
        }
        Node::Element(_) | Node::Fragment | Node::Document => {
            let start = *chars;
            for child in node.children() {
                walk(child, depth + 1, buf, chars, entities)?;
            }
            let length = *chars - start;
            if length == 0 {
                return Ok(());
            }
            if let Node::Element(el) = node.value() {
                if let Some(entity) = entity_for(&el, start, length) {
                    entities.push(entity);
                }
            }
        }
        // Comments, doctypes and processing instructions carry no text.
        _ => {}
    }

    Ok(())
}

/// Map an element to its entity, per the supported tag table.
fn entity_for(el: &Element, offset: usize, length: usize) -> Option<MessageEntity> {
    match el.name() {
        "strong" | "b" => Some(MessageEntity::new(EntityKind::Bold, offset, length)),
        "em" | "i" => Some(MessageEntity::new(EntityKind::Italic, offset, length)),
        "u" => Some(MessageEntity::new(EntityKind::Underline, offset, length)),
        "del" | "s" => Some(MessageEntity::new(EntityKind::Strikethrough, offset, length)),
        "code" => Some(
            MessageEntity::new(EntityKind::Code, offset, length)
                .with_language(el.attr("lang").unwrap_or_default()),
        ),
        "pre" => Some(MessageEntity::new(EntityKind::Pre, offset, length).with_language("")),
        // Anchors without an href produce no entity at all.
        "a" => el
            .attr("href")
            .map(|href| MessageEntity::new(EntityKind::TextLink, offset, length).with_url(href)),
        _ => None,
    }
}
