//! HTTP API tests
//!
//! Drive the router with an in-memory extractor and a clock pinned to
//! `DateFixtures::today()`.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use tokio::sync::Notify;
use tower::ServiceExt;

use domain_claims::{CapturePhase, ExtractedReceiptData, MockReceiptExtractor, PaymentMethod};
use interface_api::config::ApiConfig;
use interface_api::dto::claims::{ClaimListResponse, ClaimResponse, DraftResponse, SessionResponse};
use interface_api::{create_router, AppState};
use test_utils::{DateFixtures, ReceiptFixtures};

fn state_with(extractor: Arc<MockReceiptExtractor>) -> AppState {
    AppState::new(ApiConfig::default(), extractor, DateFixtures::clock())
}

fn server_with(extractor: Arc<MockReceiptExtractor>) -> TestServer {
    TestServer::new(create_router(state_with(extractor))).unwrap()
}

fn server() -> TestServer {
    server_with(Arc::new(MockReceiptExtractor::new()))
}

fn claim_json(claimant: &str, description: &str, amount: &str, method: &str) -> Value {
    json!({
        "claimant_name": claimant,
        "date": "19.10.2026",
        "description": description,
        "amount": amount,
        "payment_method": method,
        "remarks": "",
    })
}

async fn confirm_manual(server: &TestServer, form: Value) -> ClaimResponse {
    server.post("/api/v1/drafts/manual").await.assert_status_ok();
    let response = server.post("/api/v1/drafts/confirm").json(&form).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<ClaimResponse>()
}

async fn seed_ali_mei(server: &TestServer) {
    confirm_manual(server, claim_json("Ali", "Petrol", "50", "Cash")).await;
    confirm_manual(server, claim_json("Mei", "Stationery", "20", "Cash")).await;
    confirm_manual(server, claim_json("Ali", "Client lunch", "30", "Credit Card")).await;
}

async fn upload_jpeg(server: &TestServer) -> axum_test::TestResponse {
    server
        .post("/api/v1/receipts")
        .bytes(ReceiptFixtures::jpeg_bytes().into())
        .content_type("image/jpeg")
        .await
}

// ============================================================================
// Health Tests
// ============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let response = server().get("/health").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_reports_extractor() {
        let response = server().get("/health/ready").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "ready");
        assert_eq!(body["extractor"]["status"], "healthy");
    }

    #[tokio::test]
    async fn test_request_id_is_returned() {
        let response = server().get("/health").await;
        assert!(response.headers().contains_key("x-request-id"));
    }
}

// ============================================================================
// Capture Tests
// ============================================================================

mod capture_tests {
    use super::*;

    #[tokio::test]
    async fn test_initial_session_is_idle() {
        let session: SessionResponse = server().get("/api/v1/session").await.json();

        assert_eq!(session.phase, CapturePhase::Idle);
        assert_eq!(session.default_claimant, "");
        assert!(session.draft.is_none());
        assert_eq!(session.item_count, 0);
    }

    #[tokio::test]
    async fn test_upload_seeds_draft_from_extraction() {
        let extractor = Arc::new(MockReceiptExtractor::returning(
            ReceiptFixtures::full_extraction(),
        ));
        let server = server_with(extractor.clone());

        let response = upload_jpeg(&server).await;
        response.assert_status_ok();

        let draft: DraftResponse = response.json();
        assert_eq!(draft.phase, CapturePhase::AwaitingConfirmation);
        assert_eq!(draft.draft.date, "12.10.2026");
        assert_eq!(draft.draft.description, "Shell Bangsar");
        assert_eq!(draft.draft.amount, "85.2");
        assert_eq!(draft.draft.payment_method, PaymentMethod::Cash);
        assert_eq!(extractor.call_count(), 1);

        let session: SessionResponse = server.get("/api/v1/session").await.json();
        assert_eq!(session.phase, CapturePhase::AwaitingConfirmation);
        assert_eq!(session.draft, Some(draft.draft));
    }

    #[tokio::test]
    async fn test_failed_extraction_still_opens_draft() {
        let server = server_with(Arc::new(MockReceiptExtractor::failing("gemini")));

        let response = upload_jpeg(&server).await;
        response.assert_status_ok();

        let draft: DraftResponse = response.json();
        assert_eq!(draft.draft.date, DateFixtures::today_form_text());
        assert_eq!(draft.draft.description, "");
        assert_eq!(draft.draft.amount, "");
    }

    #[tokio::test]
    async fn test_non_image_upload_rejected() {
        let extractor = Arc::new(MockReceiptExtractor::new());
        let server = server_with(extractor.clone());

        let response = server
            .post("/api/v1/receipts")
            .bytes("%PDF-1.7".into())
            .content_type("application/pdf")
            .await;

        response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body: Value = response.json();
        assert_eq!(body["error"], "unsupported_media_type");
        assert_eq!(extractor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_upload_rejected() {
        let response = server()
            .post("/api/v1/receipts")
            .bytes(Vec::<u8>::new().into())
            .content_type("image/png")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_manual_entry_uses_today() {
        let response = server().post("/api/v1/drafts/manual").await;
        response.assert_status_ok();

        let draft: DraftResponse = response.json();
        assert_eq!(draft.draft.date, "19.10.2026");
        assert_eq!(draft.draft.claimant_name, "");
    }

    #[tokio::test]
    async fn test_manual_entry_while_draft_open_conflicts() {
        let server = server();
        server.post("/api/v1/drafts/manual").await.assert_status_ok();

        server
            .post("/api/v1/drafts/manual")
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_confirm_creates_claim() {
        let server = server();
        let claim = confirm_manual(&server, claim_json("Ali", "Petrol", "50", "Cash")).await;

        assert!(claim.id.starts_with("CLM-"));
        assert_eq!(claim.amount_display, "50.00");
        assert_eq!(claim.payment_method, PaymentMethod::Cash);
        assert_eq!(claim.ref_no, None);

        let session: SessionResponse = server.get("/api/v1/session").await.json();
        assert_eq!(session.phase, CapturePhase::Idle);
        assert_eq!(session.default_claimant, "Ali");
        assert_eq!(session.item_count, 1);
    }

    #[tokio::test]
    async fn test_confirm_missing_fields_is_unprocessable() {
        let server = server();
        server.post("/api/v1/drafts/manual").await.assert_status_ok();

        let response = server
            .post("/api/v1/drafts/confirm")
            .json(&json!({ "date": "19.10.2026", "amount": "12" }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["details"], json!(["claimant_name", "description"]));

        let session: SessionResponse = server.get("/api/v1/session").await.json();
        assert_eq!(session.phase, CapturePhase::AwaitingConfirmation);
        assert_eq!(session.item_count, 0);
    }

    #[tokio::test]
    async fn test_confirm_without_draft_conflicts() {
        server()
            .post("/api/v1/drafts/confirm")
            .json(&claim_json("Ali", "Petrol", "50", "Cash"))
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_unparsable_amount_becomes_zero() {
        let server = server();
        let claim = confirm_manual(&server, claim_json("Ali", "Parking", "abc", "Cash")).await;
        assert_eq!(claim.amount_display, "0.00");
    }

    #[tokio::test]
    async fn test_out_of_range_amount_becomes_zero() {
        let server = server();
        let huge = "79228162514264337593543950335";
        for _ in 0..2 {
            let claim = confirm_manual(&server, claim_json("Ali", "Typo", huge, "Cash")).await;
            assert_eq!(claim.amount_display, "0.00");
        }

        let list: ClaimListResponse = server.get("/api/v1/claims").await.json();
        assert_eq!(list.item_count, 2);
        assert_eq!(list.totals.cash, "0.00");

        server.get("/api/v1/claims/export").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let server = server();
        server.post("/api/v1/drafts/manual").await.assert_status_ok();

        server
            .delete("/api/v1/drafts")
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let session: SessionResponse = server.get("/api/v1/session").await.json();
        assert_eq!(session.phase, CapturePhase::Idle);
        assert!(session.draft.is_none());
    }

    #[tokio::test]
    async fn test_cancel_during_extraction_discards_result() {
        let gate = Arc::new(Notify::new());
        let extractor = Arc::new(
            MockReceiptExtractor::returning(ReceiptFixtures::full_extraction()).gated(gate.clone()),
        );
        let state = state_with(extractor.clone());
        let app = create_router(state.clone());

        let upload = Request::post("/api/v1/receipts")
            .header(header::CONTENT_TYPE, "image/jpeg")
            .body(Body::from(ReceiptFixtures::jpeg_bytes()))
            .unwrap();
        let first = tokio::spawn(app.clone().oneshot(upload));

        tokio::time::timeout(Duration::from_secs(5), async {
            while extractor.call_count() == 0 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("extraction started");

        let server = TestServer::new(app).unwrap();

        let session: SessionResponse = server.get("/api/v1/session").await.json();
        assert_eq!(session.phase, CapturePhase::Processing);

        // A second upload while the first is in flight is refused
        upload_jpeg(&server).await.assert_status(StatusCode::CONFLICT);
        assert_eq!(extractor.call_count(), 1);

        server
            .delete("/api/v1/drafts")
            .await
            .assert_status(StatusCode::NO_CONTENT);

        gate.notify_one();
        let response = first.await.unwrap().unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let session: SessionResponse = server.get("/api/v1/session").await.json();
        assert_eq!(session.phase, CapturePhase::Idle);
        assert!(session.draft.is_none());
    }

    #[tokio::test]
    async fn test_dropped_upload_releases_session() {
        let gate = Arc::new(Notify::new());
        let extractor = Arc::new(MockReceiptExtractor::new().gated(gate.clone()));
        let app = create_router(state_with(extractor.clone()));

        let upload = Request::post("/api/v1/receipts")
            .header(header::CONTENT_TYPE, "image/jpeg")
            .body(Body::from(ReceiptFixtures::jpeg_bytes()))
            .unwrap();

        // The client gives up while the extractor is still working
        let outcome = tokio::time::timeout(Duration::from_millis(200), app.clone().oneshot(upload)).await;
        assert!(outcome.is_err());
        assert_eq!(extractor.call_count(), 1);

        let server = TestServer::new(app).unwrap();
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let session: SessionResponse = server.get("/api/v1/session").await.json();
                if session.phase == CapturePhase::Idle {
                    break;
                }
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("session returned to idle");

        server.post("/api/v1/drafts/manual").await.assert_status_ok();
        server
            .delete("/api/v1/drafts")
            .await
            .assert_status(StatusCode::NO_CONTENT);

        gate.notify_one();
        upload_jpeg(&server).await.assert_status_ok();
        assert_eq!(extractor.call_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_extraction_keeps_last_claimant() {
        let extractor = Arc::new(MockReceiptExtractor::returning(ExtractedReceiptData::empty()));
        let server = server_with(extractor);
        confirm_manual(&server, claim_json("Mei", "Stationery", "20", "Cash")).await;

        let draft: DraftResponse = upload_jpeg(&server).await.json();
        assert_eq!(draft.draft.claimant_name, "Mei");
    }
}

// ============================================================================
// Claims Tests
// ============================================================================

mod claims_tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_list() {
        let list: ClaimListResponse = server().get("/api/v1/claims").await.json();

        assert_eq!(list.item_count, 0);
        assert!(list.claims.is_empty());
        assert_eq!(list.totals.cash, "0.00");
        assert_eq!(list.totals.credit_card, "0.00");
        assert_eq!(list.totals.grand_total, "0.00");
    }

    #[tokio::test]
    async fn test_totals_by_payment_method() {
        let server = server();
        seed_ali_mei(&server).await;

        let list: ClaimListResponse = server.get("/api/v1/claims").await.json();

        assert_eq!(list.item_count, 3);
        assert_eq!(list.totals.cash, "70.00");
        assert_eq!(list.totals.credit_card, "30.00");
        assert_eq!(list.totals.grand_total, "100.00");

        let descriptions: Vec<&str> = list.claims.iter().map(|c| c.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Petrol", "Stationery", "Client lunch"]);
    }

    #[tokio::test]
    async fn test_remove_claim_updates_totals() {
        let server = server();
        seed_ali_mei(&server).await;

        let list: ClaimListResponse = server.get("/api/v1/claims").await.json();
        let stationery = &list.claims[1].id;

        server
            .delete(&format!("/api/v1/claims/{stationery}"))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let list: ClaimListResponse = server.get("/api/v1/claims").await.json();
        assert_eq!(list.item_count, 2);
        assert_eq!(list.totals.cash, "50.00");
        assert_eq!(list.totals.credit_card, "30.00");
    }

    #[tokio::test]
    async fn test_remove_unknown_claim_is_noop() {
        let server = server();
        seed_ali_mei(&server).await;

        server
            .delete("/api/v1/claims/CLM-00000000-0000-0000-0000-000000000000")
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let list: ClaimListResponse = server.get("/api/v1/claims").await.json();
        assert_eq!(list.item_count, 3);
    }

    #[tokio::test]
    async fn test_remove_malformed_id() {
        server()
            .delete("/api/v1/claims/not-an-id")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

// ============================================================================
// Export Tests
// ============================================================================

mod export_tests {
    use super::*;

    #[tokio::test]
    async fn test_export_without_claims_is_empty() {
        server()
            .get("/api/v1/claims/export")
            .await
            .assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_export_downloads_workbook() {
        let server = server();
        seed_ali_mei(&server).await;

        let response = server.get("/api/v1/claims/export").await;
        response.assert_status_ok();

        assert_eq!(
            response.header(header::CONTENT_TYPE),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(
            response.header(header::CONTENT_DISPOSITION),
            "attachment; filename=\"Claim_Report.xlsx\""
        );

        // xlsx is a zip container
        assert!(response.as_bytes().starts_with(b"PK"));
    }
}
