//! Markdown rendering.

use pulldown_cmark::{Options, Parser, html};

#[derive(thiserror::Error, Debug)]
pub enum MarkdownError {
    #[error("failed to write HTML output: {0}")]
    Write(#[from] std::fmt::Error),
}

/// Render markdown to an HTML fragment using pulldown-cmark.
///
/// Plain CommonMark only: no tables, footnotes or other extensions, and no
/// awareness of front matter. The same input always produces the same bytes.
pub fn render_markdown(markdown: &str) -> Result<String, MarkdownError> {
    let parser = Parser::new_ext(markdown, Options::empty());

    let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
    html::write_html_fmt(&mut html_output, parser)?;

    Ok(html_output)
}
