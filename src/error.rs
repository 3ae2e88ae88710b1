use std::io;

use thiserror::Error;

/// Failure to save or load a persisted snapshot.
///
/// Persistence errors are scoped to a single implementation name; one
/// implementation's failed save never touches another's snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no snapshot found for implementation '{0}'")]
    NotFound(String),

    #[error("snapshot for '{name}' has a malformed row at line {line}")]
    Malformed { name: String, line: usize },

    #[error("i/o error persisting snapshot for '{name}'")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(name: &str, source: io::Error) -> Self {
        StoreError::Io {
            name: name.to_string(),
            source,
        }
    }
}

/// Failure to produce any analysis output at all.
///
/// Per-implementation shortfalls degrade to a reduced series set instead;
/// this error is reserved for the nothing-usable case.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no usable datasets; nothing to analyze")]
    NoData,
}
