//! Capture and verify handlers
//!
//! The session lock is released while the extractor runs, so other requests
//! (including a cancel) are served during a slow extraction. If the upload
//! request is dropped mid-extraction the session goes back to idle.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use tokio::sync::Mutex;
use tracing::{info, warn};

use core_kernel::ExtractionTicket;
use domain_claims::{ClaimForm, ClaimSession, ReceiptExtractionPortExt, ReceiptImage};

use crate::dto::claims::{ClaimResponse, DraftResponse};
use crate::{error::ApiError, AppState};

/// Uploads a receipt image and returns the seeded verify form
pub async fn upload_receipt(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<DraftResponse>, ApiError> {
    let mime_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let image = ReceiptImage::new(body.to_vec(), mime_type);
    if !image.is_image() {
        return Err(ApiError::UnsupportedMediaType(format!(
            "Receipts must be uploaded as an image, got '{}'",
            image.mime_type
        )));
    }
    if image.is_empty() {
        return Err(ApiError::BadRequest("Receipt image is empty".to_string()));
    }

    let ticket = state.session.lock().await.begin_extraction()?;
    let in_flight = InFlightExtraction::new(Arc::clone(&state.session), ticket);

    let extracted = state.extractor.extract_or_empty(&image).await;

    let mut session = state.session.lock().await;
    in_flight.settle();
    let form = session.complete_extraction(ticket, extracted)?.clone();
    Ok(Json(DraftResponse::awaiting(form)))
}

/// Abandons the extraction when the upload request is dropped before its
/// result reaches the session
struct InFlightExtraction {
    session: Arc<Mutex<ClaimSession>>,
    ticket: ExtractionTicket,
    settled: bool,
}

impl InFlightExtraction {
    fn new(session: Arc<Mutex<ClaimSession>>, ticket: ExtractionTicket) -> Self {
        Self {
            session,
            ticket,
            settled: false,
        }
    }

    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for InFlightExtraction {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        let ticket = self.ticket;
        if let Ok(mut session) = self.session.try_lock() {
            session.abandon_extraction(ticket);
            return;
        }

        let session = Arc::clone(&self.session);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    session.lock().await.abandon_extraction(ticket);
                });
            }
            Err(_) => warn!(ticket = %ticket, "No runtime to release abandoned extraction"),
        }
    }
}

/// Opens an empty verify form
pub async fn start_manual_entry(
    State(state): State<AppState>,
) -> Result<Json<DraftResponse>, ApiError> {
    let mut session = state.session.lock().await;
    let form = session.start_manual_entry()?.clone();
    Ok(Json(DraftResponse::awaiting(form)))
}

/// Submits the verify form and creates the claim
pub async fn confirm_draft(
    State(state): State<AppState>,
    Json(form): Json<ClaimForm>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let mut session = state.session.lock().await;
    let claim = session.confirm(form)?;
    info!(claim_id = %claim.id, "Claim confirmed");
    Ok((StatusCode::CREATED, Json(ClaimResponse::from(claim))))
}

/// Cancels the open draft or the in-flight extraction
pub async fn cancel_draft(State(state): State<AppState>) -> StatusCode {
    state.session.lock().await.cancel();
    StatusCode::NO_CONTENT
}
