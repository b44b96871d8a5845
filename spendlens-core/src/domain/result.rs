//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// Row-level problems never show up here: a row that fails to normalize is
/// skipped by its adapter. Everything below aborts the whole statement.
#[derive(Error, Debug)]
pub enum Error {
    /// The column layout of a tabular source could not be resolved
    #[error("Schema error: {0}")]
    Schema(String),

    /// A document source produced no transactions at all
    #[error("No transactions found in {0}")]
    NoTransactionsFound(String),

    /// The file could not be opened or decoded in its declared format
    #[error("Unreadable source: {0}")]
    UnreadableSource(String),

    /// An adapter failure, wrapped with the format that was attempted
    #[error("Error parsing {format}: {source}")]
    Ingestion {
        format: &'static str,
        #[source]
        source: Box<Error>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a schema error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Wrap an adapter failure with the format label ("CSV", "PDF", ...)
    pub fn ingestion(format: &'static str, source: Error) -> Self {
        Self::Ingestion {
            format,
            source: Box::new(source),
        }
    }

    /// The innermost error, looking through ingestion wrappers
    pub fn root(&self) -> &Error {
        match self {
            Self::Ingestion { source, .. } => source.root(),
            other => other,
        }
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// True for failures caused by the shape of the statement itself,
    /// as opposed to I/O or storage trouble
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self.root(),
            Self::Schema(_) | Self::NoTransactionsFound(_) | Self::UnreadableSource(_) | Self::Csv(_)
        )
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
