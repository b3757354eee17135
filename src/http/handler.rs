//! Route handlers.

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};

use crate::http::request::{ConvertRequest, RequestId};
use crate::http::response::{format_elapsed, ApiError, ConvertResponse, HealthStatus};
use crate::http::server::AppState;
use crate::observability::metrics;

/// `POST /xlsx2json`
pub async fn xlsx_to_json(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<Json<ConvertResponse>, ApiError> {
    let started = Instant::now();

    let Json(ConvertRequest { file_url }) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected request body");
        metrics::record_conversion("rejected", started);
        ApiError::from(rejection)
    })?;

    tracing::info!(file_url = %file_url, "Processing request");

    match state.converter.convert(&file_url).await {
        Ok(rows) => {
            let processing_time = format_elapsed(started.elapsed());
            tracing::info!(rows = rows.len(), elapsed = %processing_time, "Request complete");
            metrics::record_conversion("success", started);
            metrics::record_rows(rows.len());

            Ok(Json(ConvertResponse {
                success: true,
                request_id: request_id.to_string(),
                processing_time,
                rows_as_dict: rows,
            }))
        }
        Err(err) => {
            let api_error = ApiError::from(&err);
            tracing::error!(
                file_url = %file_url,
                status = api_error.status.as_u16(),
                error = %api_error.detail,
                "Conversion failed"
            );
            let outcome = if err.is_upstream() { "upstream_error" } else { "error" };
            metrics::record_conversion(outcome, started);
            Err(api_error)
        }
    }
}

/// `GET /health`
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
