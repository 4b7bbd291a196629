//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::io;

use thiserror::Error;

use crate::http_server::ConfigError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// stdin/stdout failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Runtime or listener could not be started
    #[error("boot failed: {0}")]
    BootFailed(String),

    /// `check` processed the body and the pipeline did not accept it
    #[error("request rejected with status {status}")]
    Rejected { status: u16 },
}

impl CliError {
    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        CliError::BootFailed(msg.into())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
