//! Tantivy-backed index backend.
//!
//! The corpus is indexed once into an in-RAM tantivy index. Each query term
//! is looked up per field with a typo-tolerant [`FuzzyTermQuery`]: title,
//! keywords and description match by word prefix, body content by whole
//! word. A field contributes its weight once per term, and a document must
//! match every term.

use std::collections::HashMap;

use docx_content::SearchableDoc;
use tantivy::collector::DocSetCollector;
use tantivy::query::FuzzyTermQuery;
use tantivy::schema::{Field, STORED, Schema, TEXT, Value};
use tantivy::{DocAddress, Index, IndexReader, IndexWriter, Searcher, TantivyDocument, Term};

use crate::backend::{
    CONTENT_WEIGHT, DESCRIPTION_WEIGHT, KEYWORDS_WEIGHT, SearchBackend, SearchOptions,
    SearchResult, TITLE_WEIGHT, distinct_versions, finish,
};
use crate::tokenize::query_terms;

/// Memory budget of the single indexing thread.
const WRITER_MEMORY_BYTES: usize = 50_000_000;

/// Edits allowed between a query term and an indexed word.
///
/// Short terms must match exactly; tantivy caps the distance at 2.
fn max_edits(term: &str) -> u8 {
    match term.chars().count() {
        0..=3 => 0,
        4..=7 => 1,
        _ => 2,
    }
}

/// One searchable field with its weight and match mode.
#[derive(Clone, Copy)]
struct FieldMatcher {
    field: Field,
    weight: u32,
    prefix: bool,
}

impl FieldMatcher {
    fn query(self, term: &str) -> FuzzyTermQuery {
        let term_value = Term::from_field_text(self.field, term);
        let distance = max_edits(term);
        if self.prefix {
            FuzzyTermQuery::new_prefix(term_value, distance, true)
        } else {
            FuzzyTermQuery::new(term_value, distance, true)
        }
    }
}

/// Schema field handles.
struct Fields {
    /// Position of the document in the corpus.
    ord: Field,
    title: Field,
    keywords: Field,
    description: Field,
    content: Field,
}

impl Fields {
    fn new(builder: &mut tantivy::schema::SchemaBuilder) -> Self {
        Self {
            ord: builder.add_u64_field("ord", STORED),
            title: builder.add_text_field("title", TEXT),
            keywords: builder.add_text_field("keywords", TEXT),
            description: builder.add_text_field("description", TEXT),
            content: builder.add_text_field("content", TEXT),
        }
    }

    fn matchers(&self) -> [FieldMatcher; 4] {
        [
            FieldMatcher { field: self.title, weight: TITLE_WEIGHT, prefix: true },
            FieldMatcher { field: self.keywords, weight: KEYWORDS_WEIGHT, prefix: true },
            FieldMatcher { field: self.description, weight: DESCRIPTION_WEIGHT, prefix: true },
            FieldMatcher { field: self.content, weight: CONTENT_WEIGHT, prefix: false },
        ]
    }
}

/// A committed index and its reader.
struct Built {
    reader: IndexReader,
    fields: Fields,
}

impl Built {
    fn new(docs: &[SearchableDoc]) -> tantivy::Result<Self> {
        let mut builder = Schema::builder();
        let fields = Fields::new(&mut builder);
        let index = Index::create_in_ram(builder.build());

        let mut writer: IndexWriter = index.writer_with_num_threads(1, WRITER_MEMORY_BYTES)?;
        for (ord, doc) in (0u64..).zip(docs) {
            let mut document = TantivyDocument::new();
            document.add_u64(fields.ord, ord);
            document.add_text(fields.title, &doc.title);
            for keyword in &doc.keywords {
                document.add_text(fields.keywords, keyword);
            }
            if let Some(description) = &doc.description {
                document.add_text(fields.description, description);
            }
            document.add_text(fields.content, &doc.content);
            writer.add_document(document)?;
        }
        writer.commit()?;

        Ok(Self {
            reader: index.reader()?,
            fields,
        })
    }

    /// Summed field weights per document matching `term` in any field.
    fn term_scores(
        &self,
        searcher: &Searcher,
        term: &str,
    ) -> tantivy::Result<HashMap<DocAddress, u32>> {
        let mut scores = HashMap::new();
        for matcher in self.fields.matchers() {
            for address in searcher.search(&matcher.query(term), &DocSetCollector)? {
                *scores.entry(address).or_default() += matcher.weight;
            }
        }
        Ok(scores)
    }

    /// Documents matching every term with their total score.
    fn scores(&self, searcher: &Searcher, terms: &[String]) -> tantivy::Result<HashMap<DocAddress, u32>> {
        let mut totals: Option<HashMap<DocAddress, u32>> = None;
        for term in terms {
            let scores = self.term_scores(searcher, term)?;
            totals = Some(match totals {
                None => scores,
                Some(mut totals) => {
                    totals.retain(|address, total| match scores.get(address) {
                        Some(weight) => {
                            *total += weight;
                            true
                        }
                        None => false,
                    });
                    totals
                }
            });
        }
        Ok(totals.unwrap_or_default())
    }

    /// Corpus position stored with an indexed document.
    fn ord(&self, searcher: &Searcher, address: DocAddress) -> Option<usize> {
        let stored: TantivyDocument = searcher.doc(address).ok()?;
        let ord = stored.get_first(self.fields.ord).and_then(|v| v.as_u64())?;
        usize::try_from(ord).ok()
    }
}

/// Typo-tolerant full-text backend built on tantivy.
#[derive(Default)]
pub struct IndexBackend {
    docs: Vec<SearchableDoc>,
    built: Option<Built>,
}

impl IndexBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SearchBackend for IndexBackend {
    fn name(&self) -> &'static str {
        "index"
    }

    fn initialize(&mut self, corpus: Vec<SearchableDoc>) {
        self.docs = corpus;
        self.built = match Built::new(&self.docs) {
            Ok(built) => Some(built),
            Err(e) => {
                tracing::warn!(backend = self.name(), error = %e, "Failed to build search index");
                None
            }
        };
        tracing::debug!(backend = self.name(), documents = self.docs.len(), "Initialized search backend");
    }

    fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
        let Some(built) = &self.built else {
            return Vec::new();
        };
        let terms = query_terms(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let searcher = built.reader.searcher();
        let scores = match built.scores(&searcher, &terms) {
            Ok(scores) => scores,
            Err(e) => {
                tracing::warn!(backend = self.name(), query, error = %e, "Search failed");
                return Vec::new();
            }
        };

        let results = scores
            .into_iter()
            .filter_map(|(address, score)| {
                let doc = self.docs.get(built.ord(&searcher, address)?)?;
                Some(SearchResult::from_doc(doc, score))
            })
            .collect();

        finish(results, options)
    }

    fn versions(&self) -> Vec<String> {
        distinct_versions(&self.docs)
    }
}
