use std::{path::Path, process::Command};

use crate::error::{Error, Result};

/// Default name of the external batch extraction tool.
const DEFAULT_EXTRACTOR: &str = "extract-wikipedia";

/// Environment variable overriding the extractor program.
pub const EXTRACTOR_ENV: &str = "WIKIDEX_EXTRACTOR";

/// The external archive-to-articles extraction step.
///
/// An implementation turns a compressed archive into one flat text file
/// per article under `out_dir`. Extraction failure is fatal for the
/// whole indexing run.
pub trait Extractor {
    fn extract(&self, archive: &Path, out_dir: &Path) -> Result<()>;
}

/// Runs the external extraction tool as a child process:
/// `<program> --input <archive> --output <out_dir>`.
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    program: String,
}

impl CommandExtractor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Use the program named by `WIKIDEX_EXTRACTOR`, falling back to
    /// the default tool name resolved through `PATH`.
    pub fn from_env() -> Self {
        let program = std::env::var(EXTRACTOR_ENV)
            .unwrap_or_else(|_| DEFAULT_EXTRACTOR.to_string());
        Self::new(program)
    }
}

impl Extractor for CommandExtractor {
    fn extract(&self, archive: &Path, out_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(out_dir)?;

        let status = Command::new(&self.program)
            .arg("--input")
            .arg(archive)
            .arg("--output")
            .arg(out_dir)
            .status()
            .map_err(|e| {
                Error::Extraction(format!(
                    "could not launch {}: {e}",
                    self.program
                ))
            })?;

        if !status.success() {
            return Err(Error::Extraction(format!(
                "{} exited with {status}",
                self.program
            )));
        }

        Ok(())
    }
}
