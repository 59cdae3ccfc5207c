//! Weighted fuzzy matching over the corpus.

use std::collections::HashSet;

use docx_content::SearchableDoc;

use crate::backend::{
    CONTENT_WEIGHT, DESCRIPTION_WEIGHT, KEYWORDS_WEIGHT, SearchBackend, SearchOptions,
    SearchResult, TITLE_WEIGHT, distinct_versions, finish,
};
use crate::tokenize::{query_terms, tokens};

/// Extra score when a term equals a whole word of the title.
const WHOLE_WORD_TITLE_BONUS: u32 = TITLE_WEIGHT / 2;

/// Lowest normalized Damerau-Levenshtein similarity counted as a match.
const MIN_SIMILARITY: f64 = 0.7;

/// Lowercased text of one field and its distinct words.
struct FieldText {
    text: String,
    words: HashSet<String>,
}

impl FieldText {
    fn new<'a>(parts: impl IntoIterator<Item = &'a str>) -> Self {
        let parts: Vec<&str> = parts.into_iter().collect();
        Self {
            text: parts.join("\n").to_lowercase(),
            words: parts.iter().copied().flat_map(tokens).collect(),
        }
    }

    /// Whether `term` is a substring of the field or close to one of its words.
    fn matches(&self, term: &str) -> bool {
        self.text.contains(term)
            || self
                .words
                .iter()
                .any(|word| strsim::normalized_damerau_levenshtein(term, word) >= MIN_SIMILARITY)
    }
}

/// A document with lowercased fields ready for matching.
struct Prepared {
    doc: SearchableDoc,
    title: FieldText,
    keywords: FieldText,
    description: FieldText,
    content: FieldText,
}

impl Prepared {
    fn new(doc: SearchableDoc) -> Self {
        Self {
            title: FieldText::new([doc.title.as_str()]),
            keywords: FieldText::new(doc.keywords.iter().map(String::as_str)),
            description: FieldText::new(doc.description.as_deref()),
            content: FieldText::new([doc.content.as_str()]),
            doc,
        }
    }

    /// Score of one term; zero when no field matches it.
    fn term_score(&self, term: &str) -> u32 {
        let mut score = 0;
        if self.title.matches(term) {
            score += TITLE_WEIGHT;
            if self.title.words.contains(term) {
                score += WHOLE_WORD_TITLE_BONUS;
            }
        }
        if self.keywords.matches(term) {
            score += KEYWORDS_WEIGHT;
        }
        if self.description.matches(term) {
            score += DESCRIPTION_WEIGHT;
        }
        if self.content.matches(term) {
            score += CONTENT_WEIGHT;
        }
        score
    }
}

/// Scans every document per query, summing field weights of matched terms.
///
/// A term matches a field when it is a substring of it or when it is within
/// a small edit distance of one of its words. Every query term must match at
/// least one field.
#[derive(Default)]
pub struct LocalBackend {
    docs: Vec<Prepared>,
}

impl LocalBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SearchBackend for LocalBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    fn initialize(&mut self, corpus: Vec<SearchableDoc>) {
        self.docs = corpus.into_iter().map(Prepared::new).collect();
        tracing::debug!(backend = self.name(), documents = self.docs.len(), "Initialized search backend");
    }

    fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
        let terms = query_terms(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let results = self
            .docs
            .iter()
            .filter_map(|prepared| {
                let mut total = 0;
                for term in &terms {
                    let score = prepared.term_score(term);
                    if score == 0 {
                        return None;
                    }
                    total += score;
                }
                Some(SearchResult::from_doc(&prepared.doc, total))
            })
            .collect();

        finish(results, options)
    }

    fn versions(&self) -> Vec<String> {
        distinct_versions(self.docs.iter().map(|p| &p.doc))
    }
}
