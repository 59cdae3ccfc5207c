//! Heading extraction for tables of contents.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::fence::FenceTracker;
use crate::slug::slugify;

/// ATX heading of level 2–4 at the start of a line.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{2,4})[ \t]+(.+?)(?:[ \t]+#+)?[ \t]*$").unwrap());

/// A heading found in a document body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (2, 3, or 4).
    pub level: u8,
    /// Heading text as written (inline markup is kept).
    pub text: String,
    /// Anchor id derived from `text` with [`slugify`].
    pub id: String,
}

/// Scan a Markdown body for level 2–4 headings, in document order.
///
/// Level-1 headings are not collected: the page title is rendered separately.
/// Lines inside fenced code blocks are skipped, so shell comments such as
/// `## install` in a code sample never become headings.
///
/// # Examples
///
/// ```
/// use docx_meta::extract_headings;
///
/// let headings = extract_headings("# Title\n## Getting Started\n### Step 1");
/// assert_eq!(headings.len(), 2);
/// assert_eq!(headings[0].id, "getting-started");
/// assert_eq!(headings[1].level, 3);
/// ```
#[must_use]
pub fn extract_headings(body: &str) -> Vec<Heading> {
    let mut fences = FenceTracker::default();
    body.lines()
        .filter(|line| !fences.in_code(line))
        .filter_map(|line| {
            let caps = HEADING_RE.captures(line)?;
            let text = caps[2].trim().to_owned();
            if text.is_empty() {
                return None;
            }
            #[allow(clippy::cast_possible_truncation)]
            let level = caps[1].len() as u8;
            Some(Heading {
                level,
                id: slugify(&text),
                text,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn heading(level: u8, text: &str, id: &str) -> Heading {
        Heading {
            level,
            text: text.to_owned(),
            id: id.to_owned(),
        }
    }

    #[test]
    fn test_levels_two_to_four_only() {
        let body = "# Title\n## Two\n### Three\n#### Four\n##### Five\n###### Six";

        assert_eq!(
            extract_headings(body),
            vec![
                heading(2, "Two", "two"),
                heading(3, "Three", "three"),
                heading(4, "Four", "four"),
            ]
        );
    }

    #[test]
    fn test_requires_space_after_hashes() {
        assert!(extract_headings("##NoSpace\n#hashtag").is_empty());
    }

    #[test]
    fn test_id_strips_punctuation() {
        let headings = extract_headings("## What's New in v2.0?");
        assert_eq!(headings, vec![heading(2, "What's New in v2.0?", "whats-new-in-v20")]);
    }

    #[test]
    fn test_closing_hashes_removed() {
        let headings = extract_headings("## Install ##");
        assert_eq!(headings, vec![heading(2, "Install", "install")]);
    }

    #[test]
    fn test_skips_fenced_code() {
        let body = "## Real\n```bash\n## not a heading\n```\n### Also Real";

        let texts: Vec<_> = extract_headings(body).into_iter().map(|h| h.text).collect();

        assert_eq!(texts, vec!["Real", "Also Real"]);
    }

    #[test]
    fn test_indented_heading_not_matched() {
        assert!(extract_headings("  ## Indented").is_empty());
    }

    #[test]
    fn test_empty_body() {
        assert!(extract_headings("").is_empty());
    }
}
