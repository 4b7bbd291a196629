//! CLI module for fieldguard
//!
//! Provides command-line interface for:
//! - serve: Run the validation HTTP service
//! - check: Validate one JSON body from stdin

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, SchemaKind};
pub use commands::{build_pipeline, check, check_body, resolve_config, run, run_command, serve};
pub use errors::{CliError, CliResult};
