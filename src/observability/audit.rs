//! Validation failure audit log
//!
//! - One row per field failure: timestamp, field path, rule tag
//! - Append-only; rows are never rewritten or removed
//! - Header row written once, only when the store is created
//! - Appends are serialized; one call's rows are written in a single flush
//! - All rows from one call share a timestamp (RFC-3339)

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Local, SecondsFormat};
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::errors::{AuditError, AuditResult};
use crate::schema::FieldFailure;

/// Column names, in store order. Must match the serialized names of
/// `AuditRecord`'s fields.
pub const AUDIT_HEADER: [&str; 3] = ["timestamp", "struct_and_field_name", "error_tag"];

/// A single persisted failure row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// RFC-3339 wall-clock time of the append call
    pub timestamp: String,

    /// "<StructName>.<FieldName>"
    #[serde(rename = "struct_and_field_name")]
    pub field_path: String,

    /// Violated rule tag
    pub error_tag: String,
}

impl AuditRecord {
    /// Builds one row per failure, all stamped with `timestamp`.
    pub fn batch(failures: &[FieldFailure], timestamp: &str) -> Vec<Self> {
        failures
            .iter()
            .map(|failure| Self {
                timestamp: timestamp.to_string(),
                field_path: failure.field_path.clone(),
                error_tag: failure.tag().to_string(),
            })
            .collect()
    }
}

/// Current local time in RFC-3339, `Z` for UTC.
pub fn audit_timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Audit log trait.
///
/// Implementations must persist every failure of a call or report an error;
/// a successful return means all rows are durable.
pub trait AuditLog: Send + Sync {
    /// Appends one record per failure.
    fn record_failures(&self, failures: &[FieldFailure]) -> AuditResult<()>;
}

/// CSV file audit log.
///
/// The store is opened and closed on every call. A process-wide mutex guards
/// the existence check, open, header decision, write and sync as one unit.
#[derive(Debug)]
pub struct CsvAuditLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvAuditLog {
    /// Creates a log backed by `path`. Nothing is touched until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Get the audit store path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn encode(records: &[AuditRecord], with_header: bool) -> AuditResult<Vec<u8>> {
        let mut encoder = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
        if with_header {
            encoder.write_record(AUDIT_HEADER)?;
        }
        for record in records {
            encoder.serialize(record)?;
        }
        encoder
            .into_inner()
            .map_err(|e| AuditError::Encode(e.into_error().into()))
    }

    /// Removes a store this call created but could not fill, so the next
    /// append starts over with a header.
    fn discard_new_store(path: &Path) {
        if let Err(e) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "cannot remove partially written audit store");
        }
    }
}

impl AuditLog for CsvAuditLog {
    fn record_failures(&self, failures: &[FieldFailure]) -> AuditResult<()> {
        if failures.is_empty() {
            return Ok(());
        }

        let records = AuditRecord::batch(failures, &audit_timestamp());

        // The guarded value is (), so a poisoned lock carries no broken state
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let exists = self
            .path
            .try_exists()
            .map_err(|e| AuditError::open(&self.path, e))?;
        let bytes = Self::encode(&records, !exists)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| AuditError::open(&self.path, e))?;
        let written = file.write_all(&bytes).and_then(|()| file.sync_data());
        drop(file);
        if let Err(e) = written {
            if !exists {
                Self::discard_new_store(&self.path);
            }
            return Err(AuditError::write(&self.path, e));
        }

        Ok(())
    }
}

/// In-memory audit log for testing.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    records: Arc<Mutex<Vec<AuditRecord>>>,
    calls: Arc<Mutex<usize>>,
}

impl MemoryAuditLog {
    /// Create a new in-memory audit log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded rows.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of `record_failures` calls received, including empty ones.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditLog for MemoryAuditLog {
    fn record_failures(&self, failures: &[FieldFailure]) -> AuditResult<()> {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        let batch = AuditRecord::batch(failures, &audit_timestamp());
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(batch);
        Ok(())
    }
}
