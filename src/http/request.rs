//! Request identity and payload.
//!
//! # Responsibilities
//! - Generate a fresh correlation ID for every inbound request
//! - Scope the rest of the request inside its `request` span
//! - Echo the ID back in the `x-request-id` response header

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::observability::request_span;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Body of `POST /xlsx2json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConvertRequest {
    pub file_url: String,
}

/// Eight-character correlation token, never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    pub fn generate() -> Self {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(8);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Middleware assigning the correlation ID.
///
/// Any `x-request-id` sent by the client is ignored; the ID is always
/// generated here.
pub async fn assign_request_id(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::generate();
    request.extensions_mut().insert(request_id.clone());

    let span = request_span(request_id.as_str());
    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }
    response
}
