//! Claims domain errors

use thiserror::Error;

use core_kernel::ExtractionTicket;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Invalid capture transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("A receipt is already being processed")]
    ExtractionInFlight,

    #[error("Extraction result {0} is stale and was discarded")]
    StaleExtraction(ExtractionTicket),

    #[error("No claim draft is open")]
    NoOpenDraft,

    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    #[error("Invalid claim form: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl ClaimError {
    /// Names of the form fields that failed validation, sorted
    pub fn invalid_fields(&self) -> Vec<String> {
        match self {
            ClaimError::Validation(errors) => {
                let mut fields: Vec<String> = errors
                    .field_errors()
                    .keys()
                    .map(|field| field.to_string())
                    .collect();
                fields.sort();
                fields
            }
            _ => Vec::new(),
        }
    }
}
