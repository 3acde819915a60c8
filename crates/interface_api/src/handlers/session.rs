//! Session handlers

use axum::{extract::State, Json};

use crate::dto::claims::SessionResponse;
use crate::AppState;

/// Current capture phase, default claimant and open draft
pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.session.lock().await;
    Json(SessionResponse::from(&*session))
}
