//! Response bodies.
//!
//! Success: the conversion envelope. Failure: `{"detail": "..."}` with the
//! status chosen by the error kind (400 for upstream download failures, 500
//! for everything else that went wrong while converting).

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::convert::ConvertError;
use crate::workbook::Row;

/// Success envelope for `POST /xlsx2json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub success: bool,
    pub request_id: String,
    /// Elapsed wall-clock time, e.g. `"0.42s"`.
    pub processing_time: String,
    pub rows_as_dict: Vec<Row>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// An error already mapped to its HTTP status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl From<&ConvertError> for ApiError {
    fn from(err: &ConvertError) -> Self {
        let status = if err.is_upstream() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            detail: err.describe(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}

/// `"{secs:.2}s"`
pub fn format_elapsed(elapsed: std::time::Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}
