//! HTTP route handlers for Axum.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::{
    api::types::{ErrorResponse, HealthResponse, SummaryRequest, SummaryResponse},
    llm::GenerationError,
};

use super::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Errors a handler can hand back to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] JsonRejection),
    #[error("Error generating historical summary: {0}")]
    Generation(#[from] GenerationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(rejection) => rejection.status(),
            ApiError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

#[instrument(skip_all)]
pub async fn history(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> ApiResult<SummaryResponse> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(status = %rejection.status(), reason = %rejection.body_text(), "rejected summary request");
        ApiError::from(rejection)
    })?;

    info!(place = %request.place, "generating historical summary");
    let historical_summary = state
        .history_chain
        .invoke(&[("place", request.place.as_str())])
        .await
        .map_err(|err| {
            error!(kind = err.kind(), error = %err, "summary generation failed");
            ApiError::from(err)
        })?;

    Ok(Json(SummaryResponse { historical_summary }))
}
