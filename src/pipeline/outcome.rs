//! Pipeline outcome

use super::errors::InternalError;
use crate::schema::FieldFailure;

/// Result of running one record through the pipeline.
///
/// Exactly one variant per invocation. `ValidationFailed` is the caller's
/// fault; `Internal` is ours. The two must never be confused.
#[derive(Debug)]
pub enum Outcome {
    /// Every constraint held
    Ok,
    /// One or more constraints were violated
    ValidationFailed(Vec<FieldFailure>),
    /// The record could not be fully processed
    Internal(InternalError),
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok)
    }

    pub fn is_validation_failure(&self) -> bool {
        matches!(self, Outcome::ValidationFailed(_))
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Outcome::Internal(_))
    }

    /// Returns the field failures, if validation failed
    pub fn failures(&self) -> Option<&[FieldFailure]> {
        match self {
            Outcome::ValidationFailed(failures) => Some(failures),
            _ => None,
        }
    }
}
