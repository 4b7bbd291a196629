//! Response envelope
//!
//! Every endpoint answers with `{ "isOk": bool, "message"?: string }`. Field
//! level detail never appears here; it lives only in the audit store.

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::pipeline::Outcome;

/// Body could not be decoded into the request schema
pub const MSG_MALFORMED_INPUT: &str = "json not valid";
/// Decoded request broke at least one constraint
pub const MSG_REQUEST_NOT_VALID: &str = "request not valid";
/// Anything that is not the caller's fault
pub const MSG_INTERNAL_ERROR: &str = "internal server error";

/// Uniform success/failure envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub is_ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    pub fn ok() -> Self {
        Self {
            is_ok: true,
            message: None,
        }
    }

    fn failure(message: &str) -> Self {
        Self {
            is_ok: false,
            message: Some(message.to_string()),
        }
    }

    pub fn malformed_input() -> Self {
        Self::failure(MSG_MALFORMED_INPUT)
    }

    pub fn request_not_valid() -> Self {
        Self::failure(MSG_REQUEST_NOT_VALID)
    }

    pub fn internal_error() -> Self {
        Self::failure(MSG_INTERNAL_ERROR)
    }
}

/// Status and envelope for a pipeline outcome
pub fn reply(outcome: &Outcome) -> (StatusCode, Envelope) {
    match outcome {
        Outcome::Ok => (StatusCode::OK, Envelope::ok()),
        Outcome::ValidationFailed(_) => (StatusCode::BAD_REQUEST, Envelope::request_not_valid()),
        Outcome::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, Envelope::internal_error()),
    }
}

/// Status and envelope for a body that failed to decode
pub fn malformed_reply() -> (StatusCode, Envelope) {
    (StatusCode::BAD_REQUEST, Envelope::malformed_input())
}

/// Axum response form of a reply
pub fn into_json((status, envelope): (StatusCode, Envelope)) -> (StatusCode, Json<Envelope>) {
    (status, Json(envelope))
}
