//! HTTP API Layer
//!
//! This crate exposes the receipt capture flow, the claims list and the
//! report download over REST using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: capture/verify, claims, export, session, health
//! - **Middleware**: request ids, request logging, tracing
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(config, extractor, clock);
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::Clock;
use domain_claims::{ClaimSession, ReceiptExtractionPort};
use domain_export::ReportOptions;

use crate::config::ApiConfig;
use crate::handlers::{capture, claims, export, health, session};
use crate::middleware::request_logging;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// The single capture session this process serves
    pub session: Arc<Mutex<ClaimSession>>,
    pub extractor: Arc<dyn ReceiptExtractionPort>,
    pub config: Arc<ApiConfig>,
    pub report_options: Arc<ReportOptions>,
}

impl AppState {
    pub fn new(
        config: ApiConfig,
        extractor: Arc<dyn ReceiptExtractionPort>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let report_options = config.report_options();
        Self {
            session: Arc::new(Mutex::new(ClaimSession::new(clock))),
            extractor,
            config: Arc::new(config),
            report_options: Arc::new(report_options),
        }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let draft_routes = Router::new()
        .route("/", delete(capture::cancel_draft))
        .route("/manual", post(capture::start_manual_entry))
        .route("/confirm", post(capture::confirm_draft));

    let claims_routes = Router::new()
        .route("/", get(claims::list_claims))
        .route("/export", get(export::export_report))
        .route("/:id", delete(claims::remove_claim));

    let api_routes = Router::new()
        .route("/session", get(session::get_session))
        .route(
            "/receipts",
            post(capture::upload_receipt).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .nest("/drafts", draft_routes)
        .nest("/claims", claims_routes);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(axum_middleware::from_fn(request_logging)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
