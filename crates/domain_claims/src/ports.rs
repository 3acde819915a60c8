//! Claims Domain Ports
//!
//! The claims domain depends on one outside system: a service that reads
//! the date, merchant and total off a receipt photo.
//!
//! # Architecture
//!
//! - **Gemini Adapter**: calls the Gemini `generateContent` API (infra_extraction)
//! - **Mock Adapter**: in-memory, for tests and local runs without a key
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::ports::{ReceiptExtractionPort, ReceiptExtractionPortExt};
//!
//! let extractor: Arc<dyn ReceiptExtractionPort> = Arc::new(GeminiReceiptExtractor::new(config)?);
//!
//! // Extraction failures never block manual entry
//! let data = extractor.extract_or_empty(&image).await;
//! ```

use async_trait::async_trait;
use tracing::warn;

use core_kernel::{DomainPort, HealthCheckable, PortError};

use crate::extraction::{ExtractedReceiptData, ReceiptImage};

/// Port for reading structured data off a receipt image
#[async_trait]
pub trait ReceiptExtractionPort: DomainPort + HealthCheckable {
    /// Extracts whatever fields the service can read from `image`
    ///
    /// # Errors
    ///
    /// Any transport, auth, or parse failure is reported as a [`PortError`].
    async fn extract(&self, image: &ReceiptImage) -> Result<ExtractedReceiptData, PortError>;
}

/// Extension trait for ReceiptExtractionPort with convenience methods
#[async_trait]
pub trait ReceiptExtractionPortExt: ReceiptExtractionPort {
    /// Extracts receipt data, degrading to an empty result on any failure
    async fn extract_or_empty(&self, image: &ReceiptImage) -> ExtractedReceiptData {
        match self.extract(image).await {
            Ok(data) => data,
            Err(error) => {
                warn!(
                    error = %error,
                    transient = error.is_transient(),
                    image_bytes = image.len(),
                    "Receipt extraction failed; continuing with an empty draft"
                );
                ExtractedReceiptData::empty()
            }
        }
    }
}

// Blanket implementation for all ReceiptExtractionPort implementors
impl<T: ReceiptExtractionPort + ?Sized> ReceiptExtractionPortExt for T {}

/// Mock implementation of ReceiptExtractionPort for testing
///
/// Returns a preset result (or a preset failure) and counts calls. An
/// optional gate holds each extraction until the test releases it, which
/// is how tests observe the processing state.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::{Notify, RwLock};

    use core_kernel::{AdapterHealth, HealthCheckResult};

    #[derive(Debug, Clone)]
    enum Outcome {
        Data(ExtractedReceiptData),
        Failure(String),
    }

    /// In-memory mock implementation of ReceiptExtractionPort
    #[derive(Debug)]
    pub struct MockReceiptExtractor {
        outcome: RwLock<Outcome>,
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
    }

    impl Default for MockReceiptExtractor {
        fn default() -> Self {
            Self::returning(ExtractedReceiptData::empty())
        }
    }

    impl MockReceiptExtractor {
        /// Creates a mock that extracts nothing
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a mock that always returns `data`
        pub fn returning(data: ExtractedReceiptData) -> Self {
            Self {
                outcome: RwLock::new(Outcome::Data(data)),
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        /// Creates a mock whose extractions always fail
        pub fn failing(message: impl Into<String>) -> Self {
            Self {
                outcome: RwLock::new(Outcome::Failure(message.into())),
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        /// Holds every extraction until `gate` is notified
        pub fn gated(mut self, gate: Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }

        /// Replaces the result returned by later extractions
        pub async fn set_result(&self, data: ExtractedReceiptData) {
            *self.outcome.write().await = Outcome::Data(data);
        }

        /// Number of extractions started so far
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DomainPort for MockReceiptExtractor {}

    #[async_trait]
    impl HealthCheckable for MockReceiptExtractor {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::new(
                "mock-receipt-extractor",
                AdapterHealth::Healthy,
                Some("Mock adapter always healthy".to_string()),
            )
        }
    }

    #[async_trait]
    impl ReceiptExtractionPort for MockReceiptExtractor {
        async fn extract(&self, image: &ReceiptImage) -> Result<ExtractedReceiptData, PortError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(gate) = &self.gate {
                gate.notified().await;
            }

            if image.is_empty() {
                return Err(PortError::validation("Receipt image is empty"));
            }

            match &*self.outcome.read().await {
                Outcome::Data(data) => Ok(data.clone()),
                Outcome::Failure(message) => Err(PortError::ServiceUnavailable {
                    service: message.clone(),
                }),
            }
        }
    }
}
