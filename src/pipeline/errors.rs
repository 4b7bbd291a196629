//! Internal pipeline failures
//!
//! Anything that is not the caller's fault. Callers only ever see an opaque
//! "internal server error"; the detail goes to the diagnostic channel.

use thiserror::Error;

use crate::observability::AuditError;
use crate::schema::EngineFault;

/// Cause carried by `Outcome::Internal`
#[derive(Debug, Error)]
pub enum InternalError {
    /// Validator could not evaluate the constraint table
    #[error("validation engine fault: {0}")]
    Engine(#[from] EngineFault),

    /// Audit store append failed
    #[error("audit store failure: {0}")]
    Audit(#[from] AuditError),

    /// The blocking task running the pipeline did not complete
    #[error("pipeline task failed: {0}")]
    Task(String),
}
