//! Markdown → HTML rendering.

use pulldown_cmark::{html, Options, Parser};

/// Render the supported Markdown subset to HTML.
///
/// Strikethrough (`~~`) and tables are enabled on top of CommonMark.
/// Inline HTML (e.g. `<u>`) passes through untouched, which is how
/// underline survives a Markdown round trip.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, parser);
    out
}
