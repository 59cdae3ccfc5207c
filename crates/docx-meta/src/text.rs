//! Plain-text extraction for search indexing.

use std::sync::LazyLock;

use pulldown_cmark::{Event, Options, Parser, TagEnd};
use regex::Regex;

use crate::fence::FenceTracker;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Entities decoded in raw HTML fragments. Markdown text is decoded by the parser.
const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    // Last, so "&amp;lt;" decodes to "&lt;" rather than "<".
    ("&amp;", "&"),
];

/// Extract searchable plain text from a Markdown/MDX body.
///
/// Markdown syntax is removed by parsing, HTML tags are stripped (their inner
/// text is kept), common entities are decoded, top-level MDX `import`/`export`
/// lines are dropped, and whitespace is collapsed to single spaces.
///
/// # Examples
///
/// ```
/// use docx_meta::plain_text;
///
/// let text = plain_text("## Setup\n\nRun **cargo** <kbd>build</kbd> &amp; wait.");
/// assert_eq!(text, "Setup Run cargo build & wait.");
/// ```
#[must_use]
pub fn plain_text(body: &str) -> String {
    let source = strip_mdx_statements(body);
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;

    let mut out = String::with_capacity(source.len());
    for event in Parser::new_ext(&source, options) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::Html(html) => {
                out.push_str(&decode_entities(&strip_tags(&html)));
                out.push(' ');
            }
            Event::InlineHtml(html) => out.push_str(&decode_entities(&strip_tags(&html))),
            Event::SoftBreak | Event::HardBreak | Event::Rule => out.push(' '),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::BlockQuote(_)
                | TagEnd::TableHead
                | TagEnd::TableRow
                | TagEnd::TableCell,
            ) => out.push(' '),
            _ => {}
        }
    }

    collapse_whitespace(&out)
}

/// Remove HTML/JSX tags, keeping the text between them.
#[must_use]
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

/// Decode the common HTML entities (`&nbsp; &lt; &gt; &quot; &#39; &apos; &amp;`).
#[must_use]
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_owned();
    }
    ENTITIES
        .iter()
        .fold(text.to_owned(), |acc, (entity, plain)| acc.replace(entity, plain))
}

/// Drop MDX ESM lines (`import`/`export`) outside fenced code blocks.
fn strip_mdx_statements(body: &str) -> String {
    let mut fences = FenceTracker::default();
    let mut kept = String::with_capacity(body.len());
    for line in body.lines() {
        let in_code = fences.in_code(line);
        if !in_code && (line.starts_with("import ") || line.starts_with("export ")) {
            continue;
        }
        kept.push_str(line);
        kept.push('\n');
    }
    kept
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_markdown_syntax() {
        let text = plain_text("# Title\n\nSome *emphasis* and [a link](https://x.io).\n\n- one\n- two");
        assert_eq!(text, "Title Some emphasis and a link. one two");
    }

    #[test]
    fn test_strips_html_keeps_inner_text() {
        let text = plain_text("<div class=\"note\">\nCareful here\n</div>\n\nAfter");
        assert_eq!(text, "Careful here After");
    }

    #[test]
    fn test_decodes_entities() {
        assert_eq!(plain_text("a &lt;b&gt; &nbsp;c"), "a <b> c");
    }

    #[test]
    fn test_keeps_code_text() {
        let text = plain_text("Use `cargo test`.\n\n```sh\nimport os\n```");
        assert_eq!(text, "Use cargo test. import os");
    }

    #[test]
    fn test_drops_mdx_imports() {
        let text = plain_text("import { Tabs } from './tabs'\nexport const meta = {}\n\nHello <Tabs />");
        assert_eq!(text, "Hello");
    }

    #[test]
    fn test_table_cells_are_separated() {
        let text = plain_text("| a | b |\n|---|---|\n| c | d |");
        assert_eq!(text, "a b c d");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<p>Hi <b>there</b></p>"), "Hi there");
    }

    #[test]
    fn test_decode_entities_amp_last() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("no entities"), "no entities");
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(plain_text(""), "");
    }
}
