use std::path::{Path, PathBuf};

use crate::{
    cli::{IndexArgs, QueryArgs},
    error::{Error, Result},
};

/// Result-count limit used when a run is not started from the query CLI.
/// The query pipeline never sees this value; its own limit is a required
/// argument with no default.
const INDEXING_RESULT_LIMIT: usize = 10;

/// Name of the working directory holding the extracted per-article files.
const DUMP_DIR_NAME: &str = "dump";

/// Validated run settings, constructed once at process start and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// The raw article archive (indexing) or the built index (querying).
    /// Validated to exist on disk.
    pub input_path: PathBuf,
    /// Directory holding the committed index. Replaced wholesale on each
    /// indexing run.
    pub index_dir: PathBuf,
    /// Working directory for the extracted per-article files, a sibling
    /// of the index directory.
    pub dump_dir: PathBuf,
    /// Top-K bound for query results. Strictly positive.
    pub result_limit: usize,
    /// Ingestion parse/add concurrency. At least 1.
    pub worker_count: usize,
}

impl RunConfig {
    /// Validate settings for an indexing run.
    ///
    /// The input archive must exist; worker counts below 1 are clamped
    /// up to 1 rather than rejected.
    pub fn for_indexing(args: &IndexArgs) -> Result<Self> {
        let input_path = existing_path(&args.input)?;
        let dump_dir = derive_dump_dir(&args.output);

        Ok(Self {
            input_path,
            index_dir: args.output.clone(),
            dump_dir,
            result_limit: INDEXING_RESULT_LIMIT,
            worker_count: args.num_threads.max(1),
        })
    }

    /// Validate settings for an interactive query run.
    ///
    /// The index directory must exist and the result limit must be
    /// strictly positive; there is no fallback for either.
    pub fn for_query(args: &QueryArgs) -> Result<Self> {
        let input_path = existing_path(&args.index)?;
        if args.max_res == 0 {
            return Err(Error::Config(
                "maxRes must be a positive number".into(),
            ));
        }

        Ok(Self {
            input_path: input_path.clone(),
            dump_dir: derive_dump_dir(&args.index),
            index_dir: input_path,
            result_limit: args.max_res,
            // The query session is single-threaded by contract.
            worker_count: 1,
        })
    }
}

fn existing_path(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(Error::Config(format!(
            "path does not exist: {}",
            path.display()
        )));
    }
    Ok(path.to_path_buf())
}

/// The dump directory lives next to the index directory, so that
/// replacing the index never touches the extracted articles. Falls back
/// to a fixed relative name when the index path has no parent.
fn derive_dump_dir(index_dir: &Path) -> PathBuf {
    match index_dir.parent() {
        Some(parent) if parent != Path::new("") => parent.join(DUMP_DIR_NAME),
        _ => PathBuf::from(DUMP_DIR_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_args(input: &Path, output: &str, threads: usize) -> IndexArgs {
        IndexArgs {
            input: input.to_path_buf(),
            output: PathBuf::from(output),
            num_threads: threads,
        }
    }

    #[test]
    fn missing_input_is_a_config_error() {
        let args = index_args(Path::new("/no/such/archive"), "/tmp/idx", 1);
        match RunConfig::for_indexing(&args) {
            Err(Error::Config(msg)) => assert!(msg.contains("does not exist")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn worker_count_clamps_to_one() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("dump.bz2");
        std::fs::write(&archive, "raw").unwrap();

        let args = index_args(&archive, "/tmp/idx", 0);
        let config = RunConfig::for_indexing(&args).unwrap();
        assert_eq!(config.worker_count, 1);

        let args = index_args(&archive, "/tmp/idx", 8);
        let config = RunConfig::for_indexing(&args).unwrap();
        assert_eq!(config.worker_count, 8);
    }

    #[test]
    fn dump_dir_is_a_sibling_of_the_index() {
        assert_eq!(
            derive_dump_dir(Path::new("/data/wiki/index")),
            PathBuf::from("/data/wiki/dump")
        );
    }

    #[test]
    fn dump_dir_falls_back_to_relative_name() {
        assert_eq!(derive_dump_dir(Path::new("index")), PathBuf::from("dump"));
        assert_eq!(derive_dump_dir(Path::new("/")), PathBuf::from("dump"));
    }

    #[test]
    fn query_config_requires_existing_index() {
        let args = QueryArgs {
            index: PathBuf::from("/no/such/index"),
            max_res: 10,
        };
        assert!(matches!(
            RunConfig::for_query(&args),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn query_config_rejects_zero_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let args = QueryArgs {
            index: tmp.path().to_path_buf(),
            max_res: 0,
        };
        assert!(matches!(
            RunConfig::for_query(&args),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn query_config_carries_the_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let args = QueryArgs {
            index: tmp.path().to_path_buf(),
            max_res: 25,
        };
        let config = RunConfig::for_query(&args).unwrap();
        assert_eq!(config.result_limit, 25);
        assert_eq!(config.index_dir, tmp.path());
    }
}
