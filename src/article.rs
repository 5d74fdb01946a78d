use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::error::Result;

/// 1-indexed line carrying the article title. Lines before it are
/// identifier/revision metadata written by the extractor.
pub const TITLE_LINE: usize = 3;

/// 1-indexed line where the article body starts. The line in between is
/// a separator.
pub const BODY_LINE: usize = 5;

/// The parsed form of one extracted per-article file.
///
/// Absent title or body is a normal state for stub and redirect
/// articles, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    /// Source file location. Never empty.
    pub path: String,
    /// Line 3 of the file, when the file has at least 3 lines.
    pub title: Option<String>,
    /// Lines 5 onward, joined, when the file has at least 5 lines.
    pub body: Option<String>,
}

impl ArticleRecord {
    /// Parse the article file at `path`.
    ///
    /// The file handle is released on every exit path, including read
    /// errors, which the caller is expected to handle per file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::read_from(path, BufReader::new(file))
    }

    /// Decode an article from any buffered line source.
    pub fn read_from(path: &Path, reader: impl BufRead) -> Result<Self> {
        let mut title = None;
        let mut body_lines = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let lineno = index + 1;
            if lineno == TITLE_LINE {
                title = Some(line);
            } else if lineno >= BODY_LINE {
                body_lines.push(line);
            }
        }

        let body = if body_lines.is_empty() {
            None
        } else {
            Some(body_lines.join(" "))
        };

        Ok(Self {
            path: path.to_string_lossy().into_owned(),
            title,
            body,
        })
    }
}
