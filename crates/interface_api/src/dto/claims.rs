//! Claims DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_claims::{CapturePhase, ClaimForm, ClaimItem, ClaimSession, PaymentMethod, PaymentTotals};

#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimResponse {
    pub id: String,
    pub date: String,
    pub description: String,
    pub amount: Decimal,
    /// Amount with exactly two decimals
    pub amount_display: String,
    pub payment_method: PaymentMethod,
    pub remarks: String,
    pub claimant_name: String,
    pub ref_no: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&ClaimItem> for ClaimResponse {
    fn from(claim: &ClaimItem) -> Self {
        Self {
            id: claim.id.to_string(),
            date: claim.date.clone(),
            description: claim.description.clone(),
            amount: claim.amount.value(),
            amount_display: claim.amount.to_string(),
            payment_method: claim.payment_method,
            remarks: claim.remarks.clone(),
            claimant_name: claim.claimant_name.clone(),
            ref_no: claim.ref_no.clone(),
            created_at: claim.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TotalsResponse {
    pub cash: String,
    pub credit_card: String,
    pub grand_total: String,
}

impl From<PaymentTotals> for TotalsResponse {
    fn from(totals: PaymentTotals) -> Self {
        Self {
            cash: totals.cash.to_string(),
            credit_card: totals.credit_card.to_string(),
            grand_total: totals.grand_total().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimListResponse {
    pub item_count: usize,
    pub claims: Vec<ClaimResponse>,
    pub totals: TotalsResponse,
}

impl From<&ClaimSession> for ClaimListResponse {
    fn from(session: &ClaimSession) -> Self {
        Self {
            item_count: session.claims().len(),
            claims: session.claims().iter().map(ClaimResponse::from).collect(),
            totals: session.totals().into(),
        }
    }
}

/// The open verify form
#[derive(Debug, Serialize, Deserialize)]
pub struct DraftResponse {
    pub phase: CapturePhase,
    pub draft: ClaimForm,
}

impl DraftResponse {
    pub fn awaiting(draft: ClaimForm) -> Self {
        Self {
            phase: CapturePhase::AwaitingConfirmation,
            draft,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub phase: CapturePhase,
    pub default_claimant: String,
    pub draft: Option<ClaimForm>,
    pub item_count: usize,
}

impl From<&ClaimSession> for SessionResponse {
    fn from(session: &ClaimSession) -> Self {
        Self {
            phase: session.state().phase(),
            default_claimant: session.context().last_claimant().to_string(),
            draft: session.state().form().cloned(),
            item_count: session.claims().len(),
        }
    }
}
