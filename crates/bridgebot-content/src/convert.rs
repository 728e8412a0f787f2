//! HTML → Markdown rendering.
//!
//! Walks the parsed DOM and emits the Markdown subset the engine supports:
//! bold, italic, strikethrough, inline code, fenced code blocks, links,
//! paragraphs, headings, lists, blockquotes and horizontal rules.
//! `<u>` has no Markdown syntax and is kept as literal inline HTML so
//! underline survives the round trip. Unknown elements contribute only
//! their children's text.

use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::Html;

use crate::error::ContentError;
use crate::MAX_NESTING;

/// Convert an HTML fragment to Markdown, trimmed.
pub fn html_to_markdown(html: &str) -> Result<String, ContentError> {
    let doc = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    render_children(doc.tree.root(), 0, &mut out)?;
    Ok(out.trim().to_string())
}

fn render_children(
    node: NodeRef<'_, Node>,
    depth: usize,
    out: &mut String,
) -> Result<(), ContentError> {
    for child in node.children() {
        render_node(child, depth, out)?;
    }
    Ok(())
}

/// Render children into a fresh buffer — used by wrapping inline rules.
fn render_inner(node: NodeRef<'_, Node>, depth: usize) -> Result<String, ContentError> {
    let mut inner = String::new();
    render_children(node, depth, &mut inner)?;
    Ok(inner)
}

fn render_node(node: NodeRef<'_, Node>, depth: usize, out: &mut String) -> Result<(), ContentError> {
    if depth > MAX_NESTING {
        return Err(ContentError::Conversion(format!(
            "markup nested deeper than {MAX_NESTING} levels"
        )));
    }

    let el = match node.value() {
        Node::Text(text) => {
            out.push_str(&text.text);
            return Ok(());
        }
        Node::Element(el) => el,
        _ => return render_children(node, depth + 1, out),
    };

    match el.name() {
        "strong" | "b" => wrap(node, depth, out, "**", "**")?,
        "em" | "i" => wrap(node, depth, out, "*", "*")?,
        "del" | "s" => wrap(node, depth, out, "~~", "~~")?,
        "u" => wrap(node, depth, out, "<u>", "</u>")?,
        "code" => wrap(node, depth, out, "`", "`")?,
        "a" => {
            let inner = render_inner(node, depth + 1)?;
            match el.attr("href") {
                Some(href) => {
                    out.push('[');
                    out.push_str(&inner);
                    out.push_str("](");
                    out.push_str(href);
                    out.push(')');
                }
                None => out.push_str(&inner),
            }
        }
        "p" => {
            let inner = render_inner(node, depth + 1)?;
            let trimmed = inner.trim();
            if !trimmed.is_empty() {
                out.push_str(trimmed);
                out.push_str("\n\n");
            }
        }
        "br" => out.push('\n'),
        "hr" => out.push_str("---\n\n"),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = el.name().as_bytes()[1] - b'0';
            let inner = render_inner(node, depth + 1)?;
            for _ in 0..level {
                out.push('#');
            }
            out.push(' ');
            out.push_str(inner.trim());
            out.push_str("\n\n");
        }
        "pre" => {
            out.push_str("```");
            out.push_str(&code_language(node));
            out.push('\n');
            let mut code = String::new();
            collect_text(node, &mut code);
            out.push_str(code.trim_end_matches('\n'));
            out.push_str("\n```\n\n");
        }
        "ul" => render_list(node, depth, out, None)?,
        "ol" => render_list(node, depth, out, Some(1))?,
        "blockquote" => {
            let inner = render_inner(node, depth + 1)?;
            for line in inner.trim().lines() {
                out.push_str("> ");
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
        }
        _ => render_children(node, depth + 1, out)?,
    }

    Ok(())
}

fn wrap(
    node: NodeRef<'_, Node>,
    depth: usize,
    out: &mut String,
    open: &str,
    close: &str,
) -> Result<(), ContentError> {
    let inner = render_inner(node, depth + 1)?;
    if inner.is_empty() {
        return Ok(());
    }
    out.push_str(open);
    out.push_str(&inner);
    out.push_str(close);
    Ok(())
}

fn render_list(
    node: NodeRef<'_, Node>,
    depth: usize,
    out: &mut String,
    ordered_from: Option<usize>,
) -> Result<(), ContentError> {
    let mut index = ordered_from;
    for child in node.children() {
        let is_item = matches!(child.value(), Node::Element(el) if el.name() == "li");
        if !is_item {
            continue;
        }
        let inner = render_inner(child, depth + 1)?;
        match index {
            Some(n) => {
                out.push_str(&format!("{n}. "));
                index = Some(n + 1);
            }
            None => out.push_str("- "),
        }
        out.push_str(inner.trim());
        out.push('\n');
    }
    out.push('\n');
    Ok(())
}

/// Concatenate the raw text of every descendant text node.
fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    if let Node::Text(text) = node.value() {
        out.push_str(&text.text);
    }
    for child in node.children() {
        collect_text(child, out);
    }
}

/// Fence language for a `<pre>` block: the inner `<code>`'s `lang`
/// attribute, or its `language-*` class as emitted by Markdown renderers.
fn code_language(pre: NodeRef<'_, Node>) -> String {
    for child in pre.children() {
        if let Node::Element(el) = child.value() {
            if el.name() != "code" {
                continue;
            }
            if let Some(lang) = el.attr("lang") {
                return lang.to_string();
            }
            if let Some(classes) = el.attr("class") {
                for class in classes.split_whitespace() {
                    if let Some(lang) = class.strip_prefix("language-") {
                        return lang.to_string();
                    }
                }
            }
        }
    }
    String::new()
}
