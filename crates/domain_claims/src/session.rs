//! Claim session
//!
//! One user's working state: the confirmed claims, the capture flow and the
//! context used to seed new drafts.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use core_kernel::{Clock, ClaimItemId, ExtractionTicket, SystemClock};

use crate::capture::{CaptureFlow, CaptureState};
use crate::claim::ClaimItem;
use crate::error::ClaimError;
use crate::extraction::ExtractedReceiptData;
use crate::form::ClaimForm;
use crate::store::ClaimStore;
use crate::totals::PaymentTotals;

/// Values that seed a new draft
///
/// Carried explicitly into the form rather than read from shared state.
#[derive(Clone)]
pub struct SessionContext {
    last_claimant: String,
    clock: Arc<dyn Clock>,
}

impl SessionContext {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            last_claimant: String::new(),
            clock,
        }
    }

    /// Claimant name of the most recently confirmed claim, empty at start
    pub fn last_claimant(&self) -> &str {
        &self.last_claimant
    }

    pub fn remember_claimant(&mut self, name: impl Into<String>) {
        self.last_claimant = name.into();
    }

    /// Today in the business timezone
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock::default()))
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("last_claimant", &self.last_claimant)
            .field("clock", &self.clock)
            .finish()
    }
}

/// Store, flow and context for one user session
#[derive(Debug, Default)]
pub struct ClaimSession {
    store: ClaimStore,
    flow: CaptureFlow,
    context: SessionContext,
}

impl ClaimSession {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: ClaimStore::new(),
            flow: CaptureFlow::new(),
            context: SessionContext::new(clock),
        }
    }

    pub fn store(&self) -> &ClaimStore {
        &self.store
    }

    pub fn claims(&self) -> &[ClaimItem] {
        self.store.claims()
    }

    pub fn state(&self) -> &CaptureState {
        self.flow.state()
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn totals(&self) -> PaymentTotals {
        self.store.totals()
    }

    /// Marks an upload as in flight and returns its ticket
    pub fn begin_extraction(&mut self) -> Result<ExtractionTicket, ClaimError> {
        self.flow.begin_extraction()
    }

    /// Opens the verify form for a finished extraction
    pub fn complete_extraction(
        &mut self,
        ticket: ExtractionTicket,
        extracted: ExtractedReceiptData,
    ) -> Result<&ClaimForm, ClaimError> {
        self.flow.complete_extraction(ticket, &extracted, &self.context)
    }

    /// Opens an empty verify form
    pub fn start_manual_entry(&mut self) -> Result<&ClaimForm, ClaimError> {
        self.flow.start_manual_entry(&self.context)
    }

    /// Drops an extraction nobody is waiting for any more
    pub fn abandon_extraction(&mut self, ticket: ExtractionTicket) -> bool {
        self.flow.abandon_extraction(ticket)
    }

    /// Discards the open draft or the in-flight extraction
    pub fn cancel(&mut self) {
        self.flow.cancel();
    }

    /// Confirms the submitted form and appends the resulting claim
    pub fn confirm(&mut self, form: ClaimForm) -> Result<&ClaimItem, ClaimError> {
        let claim = self.flow.confirm(form)?;
        self.context.remember_claimant(claim.claimant_name.clone());
        Ok(self.store.append(claim))
    }

    /// Removes a claim; absent ids are a no-op
    pub fn remove_claim(&mut self, id: ClaimItemId) -> Option<ClaimItem> {
        let removed = self.store.remove(id);
        if removed.is_some() {
            info!(remaining = self.store.len(), "Claims list updated");
        }
        removed
    }
}
