//! CLI argument definitions using clap
//!
//! Commands:
//! - fieldguard serve [--config <path>] [--port <n>] [--audit-log <path>]
//! - fieldguard check --schema <name> [--config <path>] [--audit-log <path>]

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// fieldguard - validate request payloads and audit rejected fields
#[derive(Parser, Debug)]
#[command(name = "fieldguard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log at debug level regardless of RUST_LOG
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the validation HTTP service
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to bind to, overriding the config file
        #[arg(long)]
        port: Option<u16>,

        /// Audit CSV path, overriding the config file
        #[arg(long)]
        audit_log: Option<PathBuf>,
    },

    /// Validate one JSON body read from stdin and print the response envelope
    Check {
        /// Request schema to decode the body as
        #[arg(long, value_enum)]
        schema: SchemaKind,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Audit CSV path, overriding the config file
        #[arg(long)]
        audit_log: Option<PathBuf>,
    },
}

/// Request schemas selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// FavoriteNumRequest
    Favorite,
    /// PetNameRequest
    PetName,
    /// ThaiCIDRequest
    ThaiCid,
    /// GuessCatNameRequest
    GuessCat,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "fieldguard",
            "serve",
            "--port",
            "8080",
            "--audit-log",
            "/tmp/audit.csv",
        ])
        .unwrap();
        match cli.command {
            Command::Serve {
                config,
                port,
                audit_log,
            } => {
                assert!(config.is_none());
                assert_eq!(port, Some(8080));
                assert_eq!(audit_log, Some(PathBuf::from("/tmp/audit.csv")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_check_schema_names() {
        for (name, kind) in [
            ("favorite", SchemaKind::Favorite),
            ("pet-name", SchemaKind::PetName),
            ("thai-cid", SchemaKind::ThaiCid),
            ("guess-cat", SchemaKind::GuessCat),
        ] {
            let cli = Cli::try_parse_from(["fieldguard", "check", "--schema", name]).unwrap();
            match cli.command {
                Command::Check { schema, .. } => assert_eq!(schema, kind),
                other => panic!("unexpected command: {:?}", other),
            }
        }
    }

    #[test]
    fn test_unknown_schema_rejected() {
        assert!(Cli::try_parse_from(["fieldguard", "check", "--schema", "dog"]).is_err());
    }
}
