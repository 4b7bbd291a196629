//! Validation-and-audit pipeline
//!
//! decoded record → validator → (failures) audit log → `Outcome`
//!
//! - `Ok` never touches the audit log
//! - `ValidationFailed` is returned only after every failure is persisted
//! - an audit failure turns the outcome `Internal`; the field failures are
//!   then reported on the diagnostic channel instead
//!
//! The validator and the audit log are injected at construction.

mod errors;
mod outcome;

pub use errors::InternalError;
pub use outcome::Outcome;

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::observability::AuditLog;
use crate::schema::{FieldFailure, Schema, SchemaValidator};

/// Runs decoded records through validation and failure auditing.
pub struct ValidationPipeline {
    validator: SchemaValidator,
    audit: Arc<dyn AuditLog>,
}

impl ValidationPipeline {
    /// Creates a pipeline from an explicitly constructed validator and audit log.
    pub fn new(validator: SchemaValidator, audit: Arc<dyn AuditLog>) -> Self {
        Self { validator, audit }
    }

    /// Validates one record, auditing any field failures.
    pub fn run<S: Schema>(&self, instance: &S) -> Outcome {
        match self.validator.validate(instance) {
            Outcome::Ok => {
                info!(schema = S::NAME, "request valid");
                Outcome::Ok
            }
            Outcome::ValidationFailed(failures) => self.audit_failures(instance, failures),
            Outcome::Internal(cause) => {
                error!(
                    schema = S::NAME,
                    request = %instance.describe(),
                    error = %cause,
                    "validation engine fault"
                );
                Outcome::Internal(cause)
            }
        }
    }

    fn audit_failures<S: Schema>(&self, instance: &S, failures: Vec<FieldFailure>) -> Outcome {
        match self.audit.record_failures(&failures) {
            Ok(()) => {
                warn!(
                    schema = S::NAME,
                    failures = failures.len(),
                    "request failed validation"
                );
                Outcome::ValidationFailed(failures)
            }
            Err(cause) => {
                error!(
                    schema = S::NAME,
                    request = %instance.describe(),
                    failures = %join_failures(&failures),
                    error = %cause,
                    "could not record validation failures"
                );
                Outcome::Internal(cause.into())
            }
        }
    }
}

fn join_failures(failures: &[FieldFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::{AuditError, AuditResult, MemoryAuditLog};
    use crate::schema::{FavoriteNumRequest, PetNameRequest};
    use std::io;
    use std::sync::{Mutex, PoisonError};

    const VALID_UUID: &str = "550e8400-e29b-41d4-a716-446655440000";

    struct BrokenAuditLog;

    impl AuditLog for BrokenAuditLog {
        fn record_failures(&self, _failures: &[FieldFailure]) -> AuditResult<()> {
            Err(AuditError::write(
                "validation_errors.csv",
                io::Error::new(io::ErrorKind::Other, "no space left on device"),
            ))
        }
    }

    /// Collects formatted tracing output for assertions
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn run_logged<S: Schema>(pipeline: &ValidationPipeline, instance: &S) -> (Outcome, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();

        let outcome = tracing::subscriber::with_default(subscriber, || pipeline.run(instance));
        (outcome, logs.contents())
    }

    fn pipeline_with(audit: Arc<dyn AuditLog>) -> ValidationPipeline {
        ValidationPipeline::new(SchemaValidator::new(), audit)
    }

    fn favorite(user_id: &str, fav_num: i64) -> FavoriteNumRequest {
        FavoriteNumRequest {
            user_id: Some(user_id.into()),
            fav_num: Some(fav_num),
        }
    }

    #[test]
    fn test_valid_request_skips_audit() {
        let audit = Arc::new(MemoryAuditLog::new());
        let pipeline = pipeline_with(audit.clone());

        assert!(pipeline.run(&favorite(VALID_UUID, 42)).is_ok());
        assert_eq!(audit.calls(), 0);
    }

    #[test]
    fn test_failures_are_audited() {
        let audit = Arc::new(MemoryAuditLog::new());
        let pipeline = pipeline_with(audit.clone());

        let outcome = pipeline.run(&favorite(VALID_UUID, 0));
        assert!(outcome.is_validation_failure());

        let records = audit.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field_path, "FavoriteNumRequest.FavNum");
        assert_eq!(records[0].error_tag, "gt");
    }

    #[test]
    fn test_audit_failure_becomes_internal() {
        let pipeline = pipeline_with(Arc::new(BrokenAuditLog));

        let outcome = pipeline.run(&PetNameRequest::default());
        match outcome {
            Outcome::Internal(InternalError::Audit(_)) => {}
            other => panic!("expected internal audit failure, got {:?}", other),
        }
    }

    #[test]
    fn test_audit_failure_logs_request_failures_and_cause() {
        let pipeline = pipeline_with(Arc::new(BrokenAuditLog));
        let request = PetNameRequest {
            pet_name: Some("M".into()),
            owner_id: Some(VALID_UUID.into()),
        };

        let (outcome, logs) = run_logged(&pipeline, &request);
        assert!(outcome.is_internal());

        let line = logs
            .lines()
            .find(|line| line.contains("ERROR"))
            .expect("error event");
        assert!(line.contains("could not record validation failures"));
        assert!(line.contains(&request.describe()));
        assert!(line.contains("PetNameRequest.PetName failed 'min=2'"));
        assert!(line.contains("cannot write audit store validation_errors.csv: no space left on device"));
    }

    #[test]
    fn test_outcome_log_levels() {
        let audit = Arc::new(MemoryAuditLog::new());
        let pipeline = pipeline_with(audit);

        let (_, logs) = run_logged(&pipeline, &favorite(VALID_UUID, 42));
        assert!(logs.lines().any(|l| l.contains("INFO") && l.contains("request valid")));

        let (_, logs) = run_logged(&pipeline, &favorite(VALID_UUID, 0));
        assert!(logs
            .lines()
            .any(|l| l.contains("WARN") && l.contains("request failed validation") && l.contains("failures=1")));
        assert!(!logs.contains("ERROR"));
    }

    #[test]
    fn test_broken_audit_not_touched_on_success() {
        let pipeline = pipeline_with(Arc::new(BrokenAuditLog));
        assert!(pipeline.run(&favorite(VALID_UUID, 7)).is_ok());
    }

    #[test]
    fn test_join_failures() {
        let failures = vec![
            FieldFailure::new("A", "X", crate::schema::Constraint::Required),
            FieldFailure::new("A", "Y", crate::schema::Constraint::Numeric),
        ];
        assert_eq!(
            join_failures(&failures),
            "A.X failed 'required'; A.Y failed 'numeric'"
        );
    }
}
