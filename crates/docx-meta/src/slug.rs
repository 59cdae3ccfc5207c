//! Slugs and human-readable fallback titles.

/// Convert a name or title into a URL-safe slug.
///
/// Lowercases, turns each whitespace run into a single hyphen, then drops every
/// character that is not an ASCII letter, digit, underscore, or hyphen.
/// Whitespace is replaced before stripping, so `"A & B"` becomes `"a--b"`.
///
/// # Examples
///
/// ```
/// use docx_meta::slugify;
///
/// assert_eq!(slugify("Getting Started"), "getting-started");
/// assert_eq!(slugify("API (v2)"), "api-v2");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_space = false;
    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            slug.push(ch);
        }
    }
    slug
}

/// Turn a file stem into a readable fallback title (`"quick-start"` → `"quick start"`).
#[must_use]
pub fn humanize(stem: &str) -> String {
    stem.replace('-', " ")
}
