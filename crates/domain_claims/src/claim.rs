//! Claim item

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{Amount, ClaimItemId};
use crate::error::ClaimError;

/// How the claimant paid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Paid out of pocket
    #[default]
    Cash,
    /// Paid with a (company) credit card
    #[serde(rename = "Credit Card", alias = "credit_card", alias = "CreditCard")]
    CreditCard,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 2] = [PaymentMethod::Cash, PaymentMethod::CreditCard];

    /// Label used in forms and report headers
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit Card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "creditcard" | "card" => Ok(PaymentMethod::CreditCard),
            _ => Err(ClaimError::UnknownPaymentMethod(s.to_string())),
        }
    }
}

/// A confirmed expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimItem {
    /// Unique identifier, assigned at confirmation
    pub id: ClaimItemId,
    /// Receipt date as entered (display text, not validated)
    pub date: String,
    /// Merchant or description
    pub description: String,
    /// Amount paid
    pub amount: Amount,
    /// Cash or credit card
    pub payment_method: PaymentMethod,
    /// Free-text remarks, empty when unset
    pub remarks: String,
    /// Person being reimbursed
    pub claimant_name: String,
    /// Optional reference number
    pub ref_no: Option<String>,
    /// Confirmation timestamp
    pub created_at: DateTime<Utc>,
}

/// The fields of a claim before it is assigned an identity
#[derive(Debug, Clone, PartialEq)]
pub struct NewClaimItem {
    pub date: String,
    pub description: String,
    pub amount: Amount,
    pub payment_method: PaymentMethod,
    pub remarks: String,
    pub claimant_name: String,
    pub ref_no: Option<String>,
}

impl ClaimItem {
    /// Assigns a fresh identifier to confirmed claim fields
    pub fn new(fields: NewClaimItem) -> Self {
        Self {
            id: ClaimItemId::new(),
            date: fields.date,
            description: fields.description,
            amount: fields.amount,
            payment_method: fields.payment_method,
            remarks: fields.remarks,
            claimant_name: fields.claimant_name,
            ref_no: fields.ref_no,
            created_at: Utc::now(),
        }
    }

    /// Amount if paid by `method`, otherwise `None`
    pub fn amount_for(&self, method: PaymentMethod) -> Option<Amount> {
        (self.payment_method == method).then_some(self.amount)
    }

    /// Reference number, or the empty string when unset
    pub fn ref_no_or_empty(&self) -> &str {
        self.ref_no.as_deref().unwrap_or_default()
    }
}
