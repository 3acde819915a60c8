//! Report export handler

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use domain_export::export_claims;

use crate::{error::ApiError, AppState};

/// Downloads the claim report; 204 when there is nothing to export
pub async fn export_report(State(state): State<AppState>) -> Result<Response, ApiError> {
    let exported = {
        let session = state.session.lock().await;
        export_claims(
            session.claims(),
            session.context().today(),
            &state.report_options,
        )?
    };

    let Some(file) = exported else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let disposition = format!("attachment; filename=\"{}\"", file.file_name);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response())
}
