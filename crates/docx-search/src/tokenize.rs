//! Query term splitting shared by the bundled backends.

/// Shortest query term that is matched.
pub(crate) const MIN_TERM_CHARS: usize = 2;

/// Lowercased alphanumeric runs of `text`.
pub(crate) fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// Distinct query terms of at least [`MIN_TERM_CHARS`] characters, in query order.
pub(crate) fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for token in tokens(query) {
        if token.chars().count() >= MIN_TERM_CHARS && !terms.contains(&token) {
            terms.push(token);
        }
    }
    terms
}
