use rayon::prelude::*;
use tracing::{info, warn};

use crate::{
    article::ArticleRecord,
    config::RunConfig,
    error::{Error, Result},
    extractor::Extractor,
    tantivy_index::SearchIndex,
    walker,
};

/// Outcome of one indexing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexingReport {
    /// Documents successfully added and committed.
    pub indexed: usize,
    /// Files skipped because they could not be read or added.
    pub skipped: usize,
}

/// Run the full ingestion pipeline: extract the archive, create the
/// index in replace mode, parse and add every extracted article, then
/// commit once.
///
/// Extraction and index-creation failures abort the run with no index
/// left behind. A failure on a single article file is logged and
/// counted, never fatal.
pub fn build(
    config: &RunConfig,
    extractor: &dyn Extractor,
) -> Result<IndexingReport> {
    info!("reading articles from {}", config.input_path.display());
    extractor.extract(&config.input_path, &config.dump_dir)?;

    info!("indexing extracted articles in {}", config.dump_dir.display());
    let index = SearchIndex::create(&config.index_dir)?;
    let mut writer = index.writer(config.worker_count)?;

    let files = walker::discover_files(&config.dump_dir)?;
    info!("found {} extracted files", files.len());

    // Parse across the worker pool, then funnel every add through the
    // single shared writer. The commit happens exactly once, after all
    // files are processed.
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_count)
        .build()
        .map_err(|e| Error::Io(std::io::Error::other(e)))?;

    let parsed: Vec<Option<ArticleRecord>> = pool.install(|| {
        files
            .par_iter()
            .map(|path| match ArticleRecord::from_file(path) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!("skipping {}: {err}", path.display());
                    None
                }
            })
            .collect()
    });

    let mut indexed = 0;
    let mut skipped = 0;
    for (path, record) in files.iter().zip(&parsed) {
        match record {
            None => skipped += 1,
            Some(record) => match index.add_article(&writer, record) {
                Ok(()) => indexed += 1,
                Err(err) => {
                    warn!("skipping {}: {err}", path.display());
                    skipped += 1;
                }
            },
        }
    }

    writer.commit()?;

    info!("indexing finished: {indexed} documents ({skipped} skipped)");
    Ok(IndexingReport { indexed, skipped })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    /// Writes canned article files instead of running the external
    /// extraction tool.
    struct FakeExtractor {
        articles: Vec<(&'static str, Vec<u8>)>,
    }

    impl FakeExtractor {
        fn new(articles: &[(&'static str, &str)]) -> Self {
            Self {
                articles: articles
                    .iter()
                    .map(|(name, content)| (*name, content.as_bytes().to_vec()))
                    .collect(),
            }
        }
    }

    impl Extractor for FakeExtractor {
        fn extract(&self, _archive: &Path, out_dir: &Path) -> Result<()> {
            std::fs::create_dir_all(out_dir)?;
            for (name, content) in &self.articles {
                let path = out_dir.join(name);
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, content)?;
            }
            Ok(())
        }
    }

    struct FailingExtractor;

    impl Extractor for FailingExtractor {
        fn extract(&self, _archive: &Path, _out_dir: &Path) -> Result<()> {
            Err(Error::Extraction("archive is corrupt".into()))
        }
    }

    fn config(root: &Path) -> RunConfig {
        let archive = root.join("dump.bz2");
        std::fs::write(&archive, "raw archive bytes").unwrap();

        RunConfig {
            input_path: archive,
            index_dir: root.join("index"),
            dump_dir: root.join("dump"),
            result_limit: 10,
            worker_count: 2,
        }
    }

    fn article(title: &str, body: &str) -> String {
        format!("1001\nrev-1\n{title}\n\n{body}\n")
    }

    #[test]
    fn builds_and_commits_all_articles() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());

        let extractor = FakeExtractor::new(&[
            ("001.txt", &article("Apple", "Apples grow on trees.")),
            ("002.txt", &article("Banana", "Bananas are yellow.")),
        ]);

        let report = build(&config, &extractor).unwrap();
        assert_eq!(report, IndexingReport { indexed: 2, skipped: 0 });

        let index = SearchIndex::open(&config.index_dir).unwrap();
        let query = index.parse_query("Banana").unwrap();
        let hits = index.search(&*query, config.result_limit).unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].path.ends_with("002.txt"));
    }

    #[test]
    fn extraction_failure_aborts_without_an_index() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());

        let result = build(&config, &FailingExtractor);
        assert!(matches!(result, Err(Error::Extraction(_))));
        assert!(!config.index_dir.exists());
    }

    #[test]
    fn unreadable_file_is_skipped_not_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());

        let mut extractor = FakeExtractor::new(&[(
            "001.txt",
            &article("Apple", "Apples grow on trees."),
        )]);
        // A second file that fails UTF-8 decoding partway through.
        extractor
            .articles
            .push(("002.txt", vec![0x31, 0x0a, 0x32, 0x0a, 0xff, 0xfe]));

        let report = build(&config, &extractor).unwrap();
        assert_eq!(report, IndexingReport { indexed: 1, skipped: 1 });

        let index = SearchIndex::open(&config.index_dir).unwrap();
        assert_eq!(index.doc_count().unwrap(), 1);
    }

    #[test]
    fn short_articles_are_indexed_by_path_only() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());

        let extractor = FakeExtractor::new(&[("stub.txt", "1001\nrev-1\n")]);

        let report = build(&config, &extractor).unwrap();
        assert_eq!(report, IndexingReport { indexed: 1, skipped: 0 });

        let index = SearchIndex::open(&config.index_dir).unwrap();
        assert_eq!(index.doc_count().unwrap(), 1);
    }

    #[test]
    fn nested_dump_directories_are_walked() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());

        let extractor = FakeExtractor::new(&[(
            "nested/deep.txt",
            &article("Cherry", "Cherries are small."),
        )]);

        let report = build(&config, &extractor).unwrap();
        assert_eq!(report.indexed, 1);
    }

    #[test]
    fn rebuild_replaces_rather_than_appends() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config(tmp.path());

        let extractor = FakeExtractor::new(&[(
            "001.txt",
            &article("Apple", "Apples grow on trees."),
        )]);

        build(&config, &extractor).unwrap();
        let report = build(&config, &extractor).unwrap();
        assert_eq!(report.indexed, 1);

        let index = SearchIndex::open(&config.index_dir).unwrap();
        assert_eq!(index.doc_count().unwrap(), 1);
    }
}
