//! Claims handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use core_kernel::ClaimItemId;

use crate::dto::claims::ClaimListResponse;
use crate::{error::ApiError, AppState};

/// Lists claims with item count and per-method totals
pub async fn list_claims(State(state): State<AppState>) -> Json<ClaimListResponse> {
    let session = state.session.lock().await;
    Json(ClaimListResponse::from(&*session))
}

/// Removes a claim; unknown ids are a no-op
pub async fn remove_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: ClaimItemId = id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid claim id: {id}")))?;

    state.session.lock().await.remove_claim(id);
    Ok(StatusCode::NO_CONTENT)
}
