//! CLI command implementations
//!
//! `serve` wires the pipeline into the HTTP server; `check` runs one body
//! through the same pipeline without a network hop. Both build the validator
//! and the audit log here and hand them to the pipeline.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::http_server::response::{malformed_reply, reply};
use crate::http_server::{Envelope, HttpServer, ServiceConfig};
use crate::observability::{init_logging, CsvAuditLog};
use crate::pipeline::ValidationPipeline;
use crate::schema::{
    decode_record, FavoriteNumRequest, GuessCatNameRequest, PetNameRequest, Schema, SchemaValidator,
    ThaiCIDRequest,
};

use super::args::{Cli, Command, SchemaKind};
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    if let Err(err) = init_logging(cli.verbose) {
        eprintln!("logging disabled: {}", err);
    }
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            port,
            audit_log,
        } => serve(config.as_deref(), port, audit_log),
        Command::Check {
            schema,
            config,
            audit_log,
        } => check(schema, config.as_deref(), audit_log),
    }
}

/// Loads the config file if given, then applies command line overrides.
pub fn resolve_config(
    config_path: Option<&Path>,
    port: Option<u16>,
    audit_log: Option<PathBuf>,
) -> CliResult<ServiceConfig> {
    let mut config = match config_path {
        Some(path) => ServiceConfig::load(path)?,
        None => ServiceConfig::default(),
    };

    if let Some(port) = port {
        config.port = port;
    }
    if let Some(audit_log) = audit_log {
        config.audit_log_path = audit_log;
    }

    config.validate()?;
    Ok(config)
}

/// Builds the pipeline with a CSV audit log at the configured path.
pub fn build_pipeline(config: &ServiceConfig) -> ValidationPipeline {
    let audit = Arc::new(CsvAuditLog::new(&config.audit_log_path));
    ValidationPipeline::new(SchemaValidator::new(), audit)
}

/// Start the validation HTTP service
pub fn serve(config_path: Option<&Path>, port: Option<u16>, audit_log: Option<PathBuf>) -> CliResult<()> {
    let config = resolve_config(config_path, port, audit_log)?;
    let pipeline = build_pipeline(&config);
    let server = HttpServer::new(config, pipeline);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Validate one JSON body from stdin and print the envelope
pub fn check(schema: SchemaKind, config_path: Option<&Path>, audit_log: Option<PathBuf>) -> CliResult<()> {
    let config = resolve_config(config_path, None, audit_log)?;
    let pipeline = build_pipeline(&config);

    let mut body = String::new();
    io::stdin().read_to_string(&mut body)?;

    let (status, envelope) = check_body(schema, &pipeline, &body);

    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, &envelope).map_err(io::Error::from)?;
    writeln!(stdout)?;

    if status.is_success() {
        Ok(())
    } else {
        Err(CliError::Rejected {
            status: status.as_u16(),
        })
    }
}

/// Decodes `body` as the chosen schema and runs it through the pipeline.
pub fn check_body(schema: SchemaKind, pipeline: &ValidationPipeline, body: &str) -> (StatusCode, Envelope) {
    match schema {
        SchemaKind::Favorite => run_body::<FavoriteNumRequest>(pipeline, body),
        SchemaKind::PetName => run_body::<PetNameRequest>(pipeline, body),
        SchemaKind::ThaiCid => run_body::<ThaiCIDRequest>(pipeline, body),
        SchemaKind::GuessCat => run_body::<GuessCatNameRequest>(pipeline, body),
    }
}

fn run_body<S: Schema + DeserializeOwned>(pipeline: &ValidationPipeline, body: &str) -> (StatusCode, Envelope) {
    // Empty input binds as {} like an empty HTTP body
    let value = if body.trim().is_empty() {
        Ok(Value::Object(Map::new()))
    } else {
        serde_json::from_str::<Value>(body)
    };

    match value.and_then(decode_record::<S>) {
        Ok(request) => reply(&pipeline.run(&request)),
        Err(err) => {
            debug!(schema = S::NAME, error = %err, "malformed request body");
            malformed_reply()
        }
    }
}
