use std::path::Path;

use tantivy::{
    Index,
    IndexReader,
    IndexWriter,
    TantivyDocument,
    collector::TopDocs,
    query::{Query, QueryParser},
    schema::*,
};

use crate::{article::ArticleRecord, error::Result};

/// Field names used in the schema.
pub mod fields {
    pub const PATH: &str = "path";
    pub const TITLE: &str = "title";
    pub const BODY: &str = "body";
}

/// Per-field indexing and storage policy.
///
/// `tokenized` fields go through the default analyzer and match by
/// term; the rest are indexed raw and match only as an exact string.
/// `stored` fields are retrievable verbatim per hit.
struct FieldPolicy {
    name: &'static str,
    tokenized: bool,
    stored: bool,
}

const FIELD_POLICY: &[FieldPolicy] = &[
    FieldPolicy {
        name: fields::PATH,
        tokenized: false,
        stored: true,
    },
    FieldPolicy {
        name: fields::TITLE,
        tokenized: false,
        stored: true,
    },
    FieldPolicy {
        name: fields::BODY,
        tokenized: true,
        stored: false,
    },
];

/// Write-buffer budget for bulk loading. Fixed rather than user-tunable;
/// sized to keep flushes rare during a full dump ingestion.
const WRITER_MEMORY_BUDGET: usize = 256 * 1024 * 1024;

/// Wraps the Tantivy index holding the article corpus.
pub struct SearchIndex {
    index: Index,
    reader: IndexReader,
    schema: Schema,
}

/// Resolved field handles for the schema.
#[derive(Clone, Copy)]
pub struct SchemaFields {
    pub path: Field,
    pub title: Field,
    pub body: Field,
}

/// One ranked search hit with its stored field values.
#[derive(Debug, Clone)]
pub struct Hit {
    pub score: f32,
    /// Absent for documents indexed without a title (content-only
    /// matches).
    pub title: Option<String>,
    pub path: String,
}

fn build_schema() -> Schema {
    let mut builder = Schema::builder();

    for policy in FIELD_POLICY {
        let indexing = if policy.tokenized {
            TextFieldIndexing::default()
                .set_tokenizer("default")
                .set_index_option(IndexRecordOption::WithFreqsAndPositions)
        } else {
            TextFieldIndexing::default()
                .set_tokenizer("raw")
                .set_index_option(IndexRecordOption::Basic)
        };

        let mut options = TextOptions::default().set_indexing_options(indexing);
        if policy.stored {
            options = options.set_stored();
        }

        builder.add_text_field(policy.name, options);
    }

    builder.build()
}

impl SearchIndex {
    /// Create a fresh index at `dir`, discarding any existing index
    /// content at that path.
    pub fn create(dir: &Path) -> Result<Self> {
        if dir.exists() {
            std::fs::remove_dir_all(dir)?;
        }
        std::fs::create_dir_all(dir)?;

        let index = Index::create_in_dir(dir, build_schema())?;
        Self::from_index(index)
    }

    /// Open a previously built index for reading.
    pub fn open(dir: &Path) -> Result<Self> {
        let index = Index::open_in_dir(dir)?;
        Self::from_index(index)
    }

    /// Create an in-memory index (for testing).
    pub fn open_in_ram() -> Result<Self> {
        Self::from_index(Index::create_in_ram(build_schema()))
    }

    fn from_index(index: Index) -> Result<Self> {
        let reader = index.reader()?;
        let schema = index.schema();

        Ok(Self {
            index,
            reader,
            schema,
        })
    }

    /// Get the resolved field handles.
    pub fn fields(&self) -> SchemaFields {
        let f = |name: &str| self.schema.get_field(name).unwrap();
        SchemaFields {
            path: f(fields::PATH),
            title: f(fields::TITLE),
            body: f(fields::BODY),
        }
    }

    /// Create a bulk-load writer with `num_threads` indexing workers.
    pub fn writer(&self, num_threads: usize) -> Result<IndexWriter> {
        Ok(self
            .index
            .writer_with_num_threads(num_threads, WRITER_MEMORY_BUDGET)?)
    }

    /// Add one parsed article via the given writer.
    ///
    /// Absent title/body fields are simply omitted from the document;
    /// a path-only document stays retrievable by path.
    pub fn add_article(
        &self,
        writer: &IndexWriter,
        record: &ArticleRecord,
    ) -> Result<()> {
        let f = self.fields();

        let mut doc = TantivyDocument::new();
        doc.add_text(f.path, &record.path);
        if let Some(title) = &record.title {
            doc.add_text(f.title, title);
        }
        if let Some(body) = &record.body {
            doc.add_text(f.body, body);
        }

        writer.add_document(doc)?;
        Ok(())
    }

    /// Parse a query string with `title` as the default field, using
    /// the same analyzers the index was built with.
    pub fn parse_query(&self, query_str: &str) -> Result<Box<dyn Query>> {
        let parser =
            QueryParser::for_index(&self.index, vec![self.fields().title]);
        Ok(parser.parse_query(query_str)?)
    }

    /// Run a parsed query, returning the top `limit` ranked hits.
    pub fn search(&self, query: &dyn Query, limit: usize) -> Result<Vec<Hit>> {
        let f = self.fields();
        self.reader.reload()?;
        let searcher = self.reader.searcher();

        let top_docs = searcher.search(query, &TopDocs::with_limit(limit))?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, doc_address) in top_docs {
            let doc: TantivyDocument = searcher.doc(doc_address)?;
            hits.push(Hit {
                score,
                title: extract_stored(&doc, f.title),
                path: extract_stored(&doc, f.path).unwrap_or_default(),
            });
        }

        Ok(hits)
    }

    /// Number of committed documents in the index.
    pub fn doc_count(&self) -> Result<u64> {
        self.reader.reload()?;
        Ok(self.reader.searcher().num_docs())
    }
}

impl std::fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex").finish_non_exhaustive()
    }
}

fn extract_stored(doc: &TantivyDocument, field: Field) -> Option<String> {
    doc.get_first(field)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}
