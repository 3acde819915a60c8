//! Gemini receipt extraction adapter

use async_trait::async_trait;
use reqwest::{header, StatusCode};
use std::time::Instant;
use tracing::{debug, info, warn};

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_claims::{ExtractedReceiptData, ReceiptExtractionPort, ReceiptImage};

use crate::config::GeminiConfig;
use crate::request::GenerateContentRequest;
use crate::response::{parse_receipt_text, ApiErrorBody, GenerateContentResponse};

const ADAPTER_ID: &str = "gemini-receipt-extractor";
const API_KEY_HEADER: &str = "x-goog-api-key";
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Extracts receipt fields with the Gemini `generateContent` API
#[derive(Debug, Clone)]
pub struct GeminiReceiptExtractor {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiReceiptExtractor {
    pub fn new(config: GeminiConfig) -> Result<Self, PortError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PortError::connection("Failed to build HTTP client", e))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    async fn generate(&self, image: &ReceiptImage) -> Result<GenerateContentResponse, PortError> {
        let started = Instant::now();
        let response = self
            .client
            .post(self.config.endpoint())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&GenerateContentRequest::for_receipt(image))
            .send()
            .await
            .map_err(|e| self.transport_error(e, started))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok());
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body, retry_after));
        }

        let parsed = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| PortError::transformation(format!("Unexpected response body: {e}")))?;

        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            candidates = parsed.candidates.len(),
            "Gemini responded"
        );
        Ok(parsed)
    }

    fn transport_error(&self, error: reqwest::Error, started: Instant) -> PortError {
        if error.is_timeout() {
            PortError::Timeout {
                operation: "generate_content".to_string(),
                duration_ms: started.elapsed().as_millis() as u64,
            }
        } else {
            PortError::connection("Gemini request failed", error)
        }
    }
}

/// Maps a non-success HTTP status to a port error
fn status_error(status: StatusCode, body: &str, retry_after: Option<u64>) -> PortError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized { message },
        StatusCode::TOO_MANY_REQUESTS => PortError::RateLimited {
            retry_after_secs: retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        },
        s if s.is_server_error() => PortError::ServiceUnavailable {
            service: format!("gemini ({})", s.as_u16()),
        },
        s => PortError::validation(format!("Gemini rejected the request ({}): {}", s.as_u16(), message)),
    }
}

impl DomainPort for GeminiReceiptExtractor {}

#[async_trait]
impl HealthCheckable for GeminiReceiptExtractor {
    async fn health_check(&self) -> HealthCheckResult {
        if self.config.has_api_key() {
            HealthCheckResult::new(
                ADAPTER_ID,
                AdapterHealth::Healthy,
                Some(format!("model {}", self.config.model)),
            )
        } else {
            HealthCheckResult::new(
                ADAPTER_ID,
                AdapterHealth::Degraded,
                Some("No API key configured; receipts must be entered manually".to_string()),
            )
        }
    }
}

#[async_trait]
impl ReceiptExtractionPort for GeminiReceiptExtractor {
    async fn extract(&self, image: &ReceiptImage) -> Result<ExtractedReceiptData, PortError> {
        if !self.config.has_api_key() {
            return Err(PortError::Unauthorized {
                message: "Gemini API key is not configured".to_string(),
            });
        }
        if image.is_empty() {
            return Err(PortError::validation("Receipt image is empty"));
        }

        info!(
            model = %self.config.model,
            mime_type = %image.mime_type,
            image_bytes = image.len(),
            "Requesting receipt extraction"
        );

        let response = self.generate(image).await?;
        let text = response
            .text()
            .ok_or_else(|| PortError::transformation("No text in Gemini response"))?;

        let data = parse_receipt_text(&text).inspect_err(|error| {
            warn!(error = %error, "Could not interpret Gemini answer");
        })?;

        info!(
            has_date = data.date.is_some(),
            has_merchant = data.merchant.is_some(),
            has_total = data.total.is_some(),
            "Receipt extraction finished"
        );
        Ok(data)
    }
}
