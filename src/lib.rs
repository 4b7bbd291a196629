//! fieldguard - validate request payloads and audit every rejected field
//!
//! decode → validate → audit → envelope

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod pipeline;
pub mod schema;
