//! wikidex - a full-text index and query CLI for encyclopedia article dumps.
//!
//! wikidex drives an external batch extractor to turn a raw article
//! archive into flat per-article files, indexes them with
//! [Tantivy](https://github.com/quickwit-oss/tantivy), and serves ranked
//! top-K queries from an interactive session.
//!
//! # Quick start
//!
//! ```no_run
//! use wikidex::{CommandExtractor, QuerySession, RunConfig, SearchIndex};
//! use wikidex::cli::IndexArgs;
//! use clap::Parser;
//!
//! let args = IndexArgs::parse_from([
//!     "index", "--input", "articles.bz2", "--output", "idx",
//! ]);
//! let config = RunConfig::for_indexing(&args).unwrap();
//! let report = wikidex::builder::build(&config, &CommandExtractor::from_env())
//!     .unwrap();
//! println!("indexed {} articles", report.indexed);
//!
//! let index = SearchIndex::open(&config.index_dir).unwrap();
//! let session = QuerySession::new(&index, 10);
//! session
//!     .run(std::io::stdin().lock(), std::io::stdout())
//!     .unwrap();
//! ```

pub mod article;
pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod session;
pub mod tantivy_index;
pub mod walker;

pub use article::ArticleRecord;
pub use builder::IndexingReport;
pub use config::RunConfig;
pub use error::{Error, Result};
pub use extractor::{CommandExtractor, Extractor};
pub use session::QuerySession;
pub use tantivy_index::SearchIndex;
