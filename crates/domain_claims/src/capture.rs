//! Capture and verify flow
//!
//! ```text
//!   Idle ──upload──► Processing ──result──► AwaitingConfirmation ──confirm──► Idle
//!    │                   │                        ▲        │
//!    └──manual entry─────┼────────────────────────┘        └──cancel──► Idle
//!                        └──cancel──► Idle (outstanding result goes stale)
//! ```
//!
//! Only one extraction may be in flight. Each one carries an
//! [`ExtractionTicket`]; a result is accepted only if its ticket is the one
//! currently being processed.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

use core_kernel::ExtractionTicket;

use crate::claim::ClaimItem;
use crate::error::ClaimError;
use crate::extraction::ExtractedReceiptData;
use crate::form::ClaimForm;
use crate::session::SessionContext;

/// Where the capture flow currently is
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CaptureState {
    #[default]
    Idle,
    Processing {
        ticket: ExtractionTicket,
    },
    AwaitingConfirmation {
        form: ClaimForm,
    },
}

/// Data-free view of [`CaptureState`] used by the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapturePhase {
    Idle,
    Processing,
    AwaitingConfirmation,
}

impl fmt::Display for CapturePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CapturePhase::Idle => "idle",
            CapturePhase::Processing => "processing",
            CapturePhase::AwaitingConfirmation => "awaiting-confirmation",
        };
        f.write_str(name)
    }
}

impl CaptureState {
    pub fn phase(&self) -> CapturePhase {
        match self {
            CaptureState::Idle => CapturePhase::Idle,
            CaptureState::Processing { .. } => CapturePhase::Processing,
            CaptureState::AwaitingConfirmation { .. } => CapturePhase::AwaitingConfirmation,
        }
    }

    /// The open draft, if any
    pub fn form(&self) -> Option<&ClaimForm> {
        match self {
            CaptureState::AwaitingConfirmation { form } => Some(form),
            _ => None,
        }
    }

    fn can_transition_to(&self, target: CapturePhase) -> bool {
        use CapturePhase::*;
        matches!(
            (self.phase(), target),
            (Idle, Processing) |
            (Idle, AwaitingConfirmation) |
            (Processing, AwaitingConfirmation) |
            (Processing, Idle) |
            (AwaitingConfirmation, Idle)
        )
    }
}

/// State machine driving upload, verification and confirmation
#[derive(Debug, Default)]
pub struct CaptureFlow {
    state: CaptureState,
}

impl CaptureFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn is_processing(&self) -> bool {
        self.state.phase() == CapturePhase::Processing
    }

    /// Starts an extraction and returns the ticket its result must carry
    pub fn begin_extraction(&mut self) -> Result<ExtractionTicket, ClaimError> {
        if self.is_processing() {
            return Err(ClaimError::ExtractionInFlight);
        }
        self.ensure_can_move_to(CapturePhase::Processing)?;

        let ticket = ExtractionTicket::new();
        self.state = CaptureState::Processing { ticket };
        info!(ticket = %ticket, "Receipt extraction started");
        Ok(ticket)
    }

    /// Accepts an extraction result and opens the verify form
    ///
    /// A result whose ticket is not the one in flight is discarded.
    pub fn complete_extraction(
        &mut self,
        ticket: ExtractionTicket,
        extracted: &ExtractedReceiptData,
        context: &SessionContext,
    ) -> Result<&ClaimForm, ClaimError> {
        match self.state {
            CaptureState::Processing { ticket: current } if current == ticket => {}
            _ => {
                warn!(ticket = %ticket, state = %self.state.phase(), "Discarding stale extraction result");
                return Err(ClaimError::StaleExtraction(ticket));
            }
        }

        debug!(
            ticket = %ticket,
            has_date = extracted.date_text().is_some(),
            has_merchant = extracted.merchant_text().is_some(),
            has_total = extracted.total.is_some(),
            "Extraction result accepted"
        );
        self.open_form(ClaimForm::seeded(extracted, context))
    }

    /// Opens an empty verify form without an upload
    pub fn start_manual_entry(&mut self, context: &SessionContext) -> Result<&ClaimForm, ClaimError> {
        if self.is_processing() {
            return Err(ClaimError::ExtractionInFlight);
        }
        self.ensure_can_move_to(CapturePhase::AwaitingConfirmation)?;

        info!("Manual claim entry opened");
        self.open_form(ClaimForm::seeded(&ExtractedReceiptData::empty(), context))
    }

    /// Drops the open draft or the in-flight extraction; idle is a no-op
    pub fn cancel(&mut self) {
        match std::mem::take(&mut self.state) {
            CaptureState::Idle => {}
            CaptureState::Processing { ticket } => {
                info!(ticket = %ticket, "Extraction cancelled; its result will be discarded");
            }
            CaptureState::AwaitingConfirmation { .. } => {
                info!("Claim draft discarded");
            }
        }
    }

    /// Returns to idle if `ticket` is still the extraction in flight
    ///
    /// Used when the caller waiting for the result goes away. Any other state
    /// (a newer upload, an open draft) is left untouched.
    pub fn abandon_extraction(&mut self, ticket: ExtractionTicket) -> bool {
        match self.state {
            CaptureState::Processing { ticket: current } if current == ticket => {
                self.state = CaptureState::Idle;
                warn!(ticket = %ticket, "Extraction abandoned before its result arrived");
                true
            }
            _ => false,
        }
    }

    /// Validates the submitted form and, on success, closes the flow
    ///
    /// On a validation error the submitted form stays open for correction.
    pub fn confirm(&mut self, form: ClaimForm) -> Result<ClaimItem, ClaimError> {
        if self.state.form().is_none() {
            return Err(ClaimError::NoOpenDraft);
        }

        match form.clone().into_new_claim() {
            Ok(fields) => {
                self.state = CaptureState::Idle;
                Ok(ClaimItem::new(fields))
            }
            Err(error) => {
                debug!(fields = ?error.invalid_fields(), "Claim form rejected");
                self.state = CaptureState::AwaitingConfirmation { form };
                Err(error)
            }
        }
    }

    fn open_form(&mut self, form: ClaimForm) -> Result<&ClaimForm, ClaimError> {
        self.state = CaptureState::AwaitingConfirmation { form };
        self.state.form().ok_or(ClaimError::NoOpenDraft)
    }

    fn ensure_can_move_to(&self, target: CapturePhase) -> Result<(), ClaimError> {
        if !self.state.can_transition_to(target) {
            return Err(ClaimError::InvalidStatusTransition {
                from: self.state.phase().to_string(),
                to: target.to_string(),
            });
        }
        Ok(())
    }
}
