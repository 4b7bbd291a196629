//! Audit store errors
//!
//! Every variant is fatal for the append call that raised it. Nothing is
//! retried and the caller is never told rows were persisted when they were not.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for audit operations
pub type AuditResult<T> = Result<T, AuditError>;

/// Audit store failures
#[derive(Debug, Error)]
pub enum AuditError {
    /// Existence check or open of the store failed
    #[error("cannot open audit store {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Rows could not be encoded
    #[error("cannot encode audit rows: {0}")]
    Encode(#[from] csv::Error),

    /// Write or sync of the encoded rows failed
    #[error("cannot write audit store {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AuditError {
    pub(crate) fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AuditError::Open {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AuditError::Write {
            path: path.into(),
            source,
        }
    }
}
