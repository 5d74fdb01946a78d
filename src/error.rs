pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("index error: {0}")]
    Index(#[from] tantivy::TantivyError),

    #[error("unable to parse query: {0}")]
    QueryParse(#[from] tantivy::query::QueryParserError),

    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Process exit code when this error terminates a run.
    ///
    /// Configuration problems exit with 2 (alongside usage help);
    /// everything else that escapes to `main` is a runtime failure
    /// and exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_exit_two() {
        let err = Error::Config("missing input".into());
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn runtime_errors_exit_one() {
        let err = Error::Extraction("extractor crashed".into());
        assert_eq!(err.exit_code(), 1);

        let err = Error::Io(std::io::Error::other("disk gone"));
        assert_eq!(err.exit_code(), 1);
    }
}
