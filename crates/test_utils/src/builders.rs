//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use fake::faker::company::en::CompanyName;
use fake::faker::name::en::FirstName;
use fake::Fake;

use core_kernel::Amount;
use domain_claims::{ClaimForm, ClaimItem, NewClaimItem, PaymentMethod};

use crate::fixtures::DateFixtures;

/// Builder for confirmed claims
#[derive(Debug, Clone)]
pub struct ClaimItemBuilder {
    date: String,
    description: String,
    amount: Amount,
    payment_method: PaymentMethod,
    remarks: String,
    claimant_name: String,
    ref_no: Option<String>,
}

impl Default for ClaimItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimItemBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            date: DateFixtures::today_form_text().to_string(),
            description: "Parking".to_string(),
            amount: Amount::from_minor(1000),
            payment_method: PaymentMethod::Cash,
            remarks: String::new(),
            claimant_name: "Ali".to_string(),
            ref_no: None,
        }
    }

    /// Creates a builder with a generated claimant and merchant
    pub fn random() -> Self {
        let claimant: String = FirstName().fake();
        let merchant: String = CompanyName().fake();
        Self::new().with_claimant(claimant).with_description(merchant)
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the amount from text, parsed the way the form parses it
    pub fn with_amount(mut self, amount: &str) -> Self {
        self.amount = Amount::parse_lenient(amount);
        self
    }

    pub fn with_amount_value(mut self, amount: Amount) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }

    pub fn with_claimant(mut self, name: impl Into<String>) -> Self {
        self.claimant_name = name.into();
        self
    }

    pub fn with_ref_no(mut self, ref_no: impl Into<String>) -> Self {
        self.ref_no = Some(ref_no.into());
        self
    }

    /// Builds a claim with a fresh id
    pub fn build(self) -> ClaimItem {
        ClaimItem::new(NewClaimItem {
            date: self.date,
            description: self.description,
            amount: self.amount,
            payment_method: self.payment_method,
            remarks: self.remarks,
            claimant_name: self.claimant_name,
            ref_no: self.ref_no,
        })
    }

    /// The form a user would submit to create this claim
    pub fn build_form(self) -> ClaimForm {
        ClaimForm {
            claimant_name: self.claimant_name,
            date: self.date,
            description: self.description,
            amount: self.amount.value().to_string(),
            payment_method: self.payment_method,
            remarks: self.remarks,
            ref_no: self.ref_no,
        }
    }
}
