//! Observability subsystem
//!
//! Two channels, kept apart:
//! - the audit log, a durable CSV record of every rejected field for later analysis
//! - operator diagnostics, emitted as `tracing` events on stderr
//!
//! # Usage
//!
//! ```ignore
//! use fieldguard::observability::{init_logging, AuditLog, CsvAuditLog};
//!
//! init_logging(false)?;
//! let audit = CsvAuditLog::new("validation_errors.csv");
//! audit.record_failures(&failures)?;
//! ```

mod audit;
mod errors;

pub use audit::{audit_timestamp, AuditLog, AuditRecord, CsvAuditLog, MemoryAuditLog, AUDIT_HEADER};
pub use errors::{AuditError, AuditResult};

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "fieldguard=info,tower_http=info";

/// Builds the log filter from `RUST_LOG`, falling back to the default.
///
/// `verbose` raises the crate's own events to DEBUG.
pub fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("fieldguard=debug,tower_http=debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the global tracing subscriber writing to stderr.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(verbose: bool) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(log_filter(verbose)),
        )
        .try_init()
}
