use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error type shared by the whole data layer
// ---------------------------------------------------------------------------

pub type Result<T> = std::result::Result<T, QueryError>;

/// Coarse classification used by the command surface to pick its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    SchemaMismatch,
    NotFound,
    Io,
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Headers mismatch in {}", path.display())]
    SchemaMismatch { path: PathBuf },

    #[error("{}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A data row the CSV reader could not decode.
    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Column '{column}' must be numeric: '{value}' is not a number")]
    NotNumeric { column: String, value: String },
}

impl QueryError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        QueryError::InvalidInput(msg.into())
    }

    pub fn column_not_found(column: &str) -> Self {
        QueryError::InvalidInput(format!("Column '{column}' not found in CSV."))
    }

    /// Classify an I/O failure on `path` as NotFound or generic Io.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => QueryError::NotFound { path, source },
            _ => QueryError::Io { path, source },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::InvalidInput(_)
            | QueryError::Csv { .. }
            | QueryError::NotNumeric { .. } => ErrorKind::InvalidInput,
            QueryError::SchemaMismatch { .. } => ErrorKind::SchemaMismatch,
            QueryError::NotFound { .. } => ErrorKind::NotFound,
            QueryError::Io { .. } => ErrorKind::Io,
        }
    }
}
