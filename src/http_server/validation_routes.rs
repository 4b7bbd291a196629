//! Validation HTTP Routes
//!
//! One POST endpoint per request schema, all served by the same generic
//! handler:
//! - `/favorite` - favorite number
//! - `/pet-name` - pet name
//! - `/thai-cid` - Thai citizen ID
//! - `/guess-cat` - cat name guess

use std::sync::Arc;

use axum::{
    body::HttpBody,
    extract::{rejection::JsonRejection, FromRequest, Json, Request, State},
    http::StatusCode,
    routing::post,
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, error};

use super::response::{into_json, malformed_reply, reply, Envelope};
use crate::pipeline::{InternalError, Outcome, ValidationPipeline};
use crate::schema::{
    decode_record, FavoriteNumRequest, GuessCatNameRequest, PetNameRequest, Schema, ThaiCIDRequest,
};

/// Shared validation state
pub struct ValidationState {
    pub pipeline: ValidationPipeline,
}

impl ValidationState {
    pub fn new(pipeline: ValidationPipeline) -> Self {
        Self { pipeline }
    }
}

/// Validation routes with shared state
pub fn validation_routes(state: Arc<ValidationState>) -> Router {
    Router::new()
        .route("/favorite", post(validate_handler::<FavoriteNumRequest>))
        .route("/pet-name", post(validate_handler::<PetNameRequest>))
        .route("/thai-cid", post(validate_handler::<ThaiCIDRequest>))
        .route("/guess-cat", post(validate_handler::<GuessCatNameRequest>))
        .with_state(state)
}

/// Reads the body as a JSON value.
///
/// A body of known zero length binds as `{}`, so it reaches the validator and
/// fails the `required` rules instead of being treated as malformed.
async fn read_body(request: Request) -> Result<Value, JsonRejection> {
    if request.body().size_hint().exact() == Some(0) {
        return Ok(Value::Object(Map::new()));
    }
    let Json(body) = Json::<Value>::from_request(request, &()).await?;
    Ok(body)
}

/// Decodes the body as `S` and runs it through the pipeline.
///
/// The audit append is blocking file I/O, so the pipeline runs on the
/// blocking pool.
async fn validate_handler<S>(
    State(state): State<Arc<ValidationState>>,
    request: Request,
) -> (StatusCode, Json<Envelope>)
where
    S: Schema + DeserializeOwned + Send + 'static,
{
    let body = match read_body(request).await {
        Ok(body) => body,
        Err(rejection) => {
            debug!(schema = S::NAME, error = %rejection.body_text(), "malformed request body");
            return into_json(malformed_reply());
        }
    };

    let record: S = match decode_record(body) {
        Ok(record) => record,
        Err(err) => {
            debug!(schema = S::NAME, error = %err, "malformed request body");
            return into_json(malformed_reply());
        }
    };

    let outcome = tokio::task::spawn_blocking(move || state.pipeline.run(&record))
        .await
        .unwrap_or_else(|join_error| {
            error!(schema = S::NAME, error = %join_error, "validation task did not complete");
            Outcome::Internal(InternalError::Task(join_error.to_string()))
        });

    into_json(reply(&outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::MemoryAuditLog;
    use crate::schema::SchemaValidator;

    #[test]
    fn test_validation_routes_build() {
        let pipeline = ValidationPipeline::new(SchemaValidator::new(), Arc::new(MemoryAuditLog::new()));
        let _router = validation_routes(Arc::new(ValidationState::new(pipeline)));
    }
}
