//! Markdown to HTML conversion.

use pulldown_cmark::{Options, Parser, html};

/// Render a Markdown body to HTML.
///
/// Enables tables, strikethrough, task lists and footnotes.
pub(crate) fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(markdown, options);

    let mut output = String::with_capacity(markdown.len() + markdown.len() / 2);
    html::push_html(&mut output, parser);
    output
}
