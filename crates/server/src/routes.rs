//! HTTP surface: request/response types, handlers, and error mapping.
//!
//! Pipeline failures are mapped to the wire contract here. The underlying
//! cause is logged with its full detail; callers only ever see a fixed,
//! generic message per failure class.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use textgate_core::{Importer, TextgateError};

/// Shared pipeline handle; the importer holds no per-request state.
pub type SharedImporter = Arc<Importer>;

/// Body of `POST /import-script`.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub url: String,
}

/// Error body returned for every failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// `GET /` liveness probe.
pub async fn liveness() -> &'static str {
    "OK"
}

/// `POST /import-script`: run the pipeline and answer with the article
/// or a mapped error.
pub async fn import_script(
    State(importer): State<SharedImporter>, Json(request): Json<ImportRequest>,
) -> Response {
    match importer.import(&request.url).await {
        Ok(article) => (StatusCode::OK, Json(article)).into_response(),
        Err(err) => error_response(&err).into_response(),
    }
}

/// Maps a pipeline error to its HTTP status and caller-visible message.
pub fn error_response(err: &TextgateError) -> (StatusCode, Json<ErrorBody>) {
    let (status, message) = match err {
        TextgateError::InvalidUrl(_) => (StatusCode::BAD_REQUEST, "Invalid URL"),
        TextgateError::SchemeNotAllowed(_) => (StatusCode::BAD_REQUEST, "Only http/https allowed"),
        TextgateError::PrivateNetworkDenied { .. } => (StatusCode::FORBIDDEN, "Private network access denied"),
        TextgateError::TooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "Content too large"),
        TextgateError::Timeout { .. } => (StatusCode::GATEWAY_TIMEOUT, "Upstream fetch timed out"),
        TextgateError::ResolutionFailed { .. }
        | TextgateError::RedirectLimit { .. }
        | TextgateError::UpstreamStatus { .. }
        | TextgateError::Network(_) => (StatusCode::BAD_GATEWAY, "Upstream fetch failed"),
        TextgateError::NoContent => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to extract article content"),
    };

    if status.is_server_error() {
        tracing::error!(error = %err, "import failed");
    } else {
        tracing::warn!(error = %err, "import rejected");
    }

    (status, Json(ErrorBody { error: message.to_string() }))
}
