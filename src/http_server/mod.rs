//! # HTTP Server Module
//!
//! Thin axum surface over the validation pipeline.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /api/v1/favorite` - Favorite number
//! - `POST /api/v1/pet-name` - Pet name
//! - `POST /api/v1/thai-cid` - Thai citizen ID
//! - `POST /api/v1/guess-cat` - Cat name guess

pub mod config;
pub mod health_routes;
pub mod response;
pub mod server;
pub mod validation_routes;

pub use config::{ConfigError, ServiceConfig};
pub use response::Envelope;
pub use server::HttpServer;
