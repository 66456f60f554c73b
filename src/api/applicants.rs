//! Application submission and applicant-log endpoints.

use super::{run_to_completion, ApiError, SuccessResponse};
use crate::core::csv_export::{export_applicants_csv, EXPORT_FILENAME};
use crate::core::{Applicant, ApplicationRequest};
use crate::server::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

/// `POST /apply`
pub async fn apply(
    State(state): State<AppState>,
    payload: Result<Json<ApplicationRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!("Rejected application body: {}", rejection);
        ApiError::bad_request("Invalid request body")
    })?;

    let service = state.applications.clone();
    run_to_completion(async move { service.submit(request).await }).await?;

    Ok(Json(SuccessResponse::with_message(
        "Application submitted successfully!",
    )))
}

/// `GET /applicants`：新的在前
pub async fn list_applicants(State(state): State<AppState>) -> Json<Vec<Applicant>> {
    Json(state.store.list_applicants().await)
}

/// `DELETE /applicants`
pub async fn clear_applicants(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let store = state.store.clone();
    run_to_completion(async move { store.clear_applicants().await }).await?;

    Ok(Json(SuccessResponse::with_message("All applicants deleted.")))
}

/// `GET /applicants/export`：下載 CSV
pub async fn export_applicants(State(state): State<AppState>) -> Result<Response, ApiError> {
    let ledger = state.store.snapshot().await;
    let csv = export_applicants_csv(
        &ledger.log.newest_first(),
        &ledger.inventory,
        state.export_utc_offset_hours,
    )?;

    let disposition = format!("attachment; filename=\"{}\"", EXPORT_FILENAME);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}
