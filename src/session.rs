use std::io::{BufRead, Write};

use crate::{
    error::{Error, Result},
    tantivy_index::{Hit, SearchIndex},
};

/// Token that ends the session. Exact, case-sensitive match.
pub const SENTINEL: &str = "q";

/// Rendered in place of a stored title for content-only matches.
const NO_TITLE: &str = "(no title)";

/// Interactive read-eval loop over an opened index.
///
/// The session is driven through injected input/output streams, so the
/// same loop serves a console operator and a test harness.
pub struct QuerySession<'a> {
    index: &'a SearchIndex,
    result_limit: usize,
}

impl<'a> QuerySession<'a> {
    pub fn new(index: &'a SearchIndex, result_limit: usize) -> Self {
        Self {
            index,
            result_limit,
        }
    }

    /// Consume query tokens from `input` until the sentinel or end of
    /// input, writing prompts and results to `output`.
    ///
    /// Query parse and search failures are reported to the operator and
    /// the loop continues; only I/O errors on the streams themselves
    /// escape.
    pub fn run(
        &self,
        input: impl BufRead,
        mut output: impl Write,
    ) -> Result<()> {
        writeln!(output, "Enter a search query or \"{SENTINEL}\" to exit")?;

        for line in input.lines() {
            let line = line?;
            for token in line.split_whitespace() {
                if token == SENTINEL {
                    return Ok(());
                }
                self.answer(token, &mut output)?;
                writeln!(
                    output,
                    "Search again? Enter query or \"{SENTINEL}\" to exit"
                )?;
            }
        }

        Ok(())
    }

    /// Parse, search, and render one query.
    fn answer(&self, query_str: &str, output: &mut impl Write) -> Result<()> {
        let query = match self.index.parse_query(query_str) {
            Ok(query) => query,
            Err(Error::QueryParse(err)) => {
                writeln!(output, "Unable to parse query: {err}")?;
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        let hits = match self.index.search(&*query, self.result_limit) {
            Ok(hits) => hits,
            Err(err) => {
                writeln!(
                    output,
                    "Error searching for query \"{query_str}\": {err}"
                )?;
                return Ok(());
            }
        };

        for hit in &hits {
            render_hit(hit, output)?;
        }

        Ok(())
    }
}

fn render_hit(hit: &Hit, output: &mut impl Write) -> Result<()> {
    writeln!(output, "title : {}", hit.title.as_deref().unwrap_or(NO_TITLE))?;
    writeln!(output, "path : {}", hit.path)?;
    Ok(())
}
