use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "wikidex",
    about = "Build and interactively search a full-text index over \
             encyclopedia article dumps"
)]
pub struct Cli {
    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract an article archive and build a fresh index from it
    Index(IndexArgs),
    /// Interactively query a previously built index
    Query(QueryArgs),
}

// -- Index --

#[derive(Debug, Parser)]
pub struct IndexArgs {
    /// Path to the raw article archive
    #[arg(long)]
    pub input: PathBuf,

    /// Directory that will hold the built index (replaced if present)
    #[arg(long)]
    pub output: PathBuf,

    /// Number of concurrent ingestion workers
    #[arg(long = "numThreads", default_value = "1")]
    pub num_threads: usize,
}

// -- Query --

#[derive(Debug, Parser)]
pub struct QueryArgs {
    /// Path to a previously built index
    #[arg(long)]
    pub index: PathBuf,

    /// Maximum number of results returned per query
    #[arg(long = "maxRes")]
    pub max_res: usize,
}
