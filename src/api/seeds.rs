//! Inventory endpoints: list, full replace, and CSV initialization.

use super::{run_to_completion, ApiError, SuccessResponse};
use crate::core::csv_import::parse_seed_csv_bytes;
use crate::core::SeedVariety;
use crate::server::AppState;
use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    Json,
};

/// `GET /seeds`
pub async fn list_seeds(State(state): State<AppState>) -> Json<Vec<SeedVariety>> {
    Json(state.store.list_seeds().await)
}

/// `POST /seeds`：以 JSON 陣列整批取代庫存
pub async fn replace_seeds(
    State(state): State<AppState>,
    payload: Result<Json<Vec<SeedVariety>>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(seeds) = payload.map_err(|rejection| {
        tracing::debug!("Rejected seed update body: {}", rejection);
        ApiError::bad_request("Invalid data format")
    })?;

    let store = state.store.clone();
    run_to_completion(async move { store.replace_seeds(seeds).await }).await?;

    Ok(Json(SuccessResponse::ok()))
}

/// `POST /seeds/init`：上傳 CSV（欄位 `file`）重建庫存
pub async fn init_seeds(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let mut multipart = multipart.map_err(|_| ApiError::bad_request("No file uploaded"))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid upload: {}", e)))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("Invalid upload: {}", e)))?;
            upload = Some(bytes);
            break;
        }
    }

    let data = upload.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;
    let seeds =
        parse_seed_csv_bytes(&data).map_err(|e| ApiError::internal("Failed to parse CSV", e))?;

    let store = state.store.clone();
    let count = run_to_completion(async move { store.replace_seeds(seeds).await }).await?;

    Ok(Json(SuccessResponse::with_count(count)))
}
