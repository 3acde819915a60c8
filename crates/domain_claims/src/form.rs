//! Claim verification form
//!
//! The editable draft shown to the user before a claim is created. It is
//! seeded from whatever the extractor read and falls back to session
//! defaults for the rest.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::{format_form_date, Amount};

use crate::claim::{NewClaimItem, PaymentMethod};
use crate::error::ClaimError;
use crate::extraction::ExtractedReceiptData;
use crate::session::SessionContext;

/// Draft claim fields as edited by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ClaimForm {
    #[validate(custom(function = "non_blank"))]
    pub claimant_name: String,

    #[validate(custom(function = "non_blank"))]
    pub date: String,

    #[validate(custom(function = "non_blank"))]
    pub description: String,

    /// Amount as typed; parsed leniently on submit
    pub amount: String,

    pub payment_method: PaymentMethod,

    pub remarks: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_no: Option<String>,
}

fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("must not be empty".into());
        return Err(error);
    }
    Ok(())
}

impl ClaimForm {
    /// Builds the form shown after an extraction (or for manual entry)
    ///
    /// Extracted fields win; otherwise the date is today in the business
    /// timezone, the amount and description are empty, the method is Cash
    /// and the claimant is the last one used in this session.
    pub fn seeded(extracted: &ExtractedReceiptData, context: &SessionContext) -> Self {
        let date = extracted
            .date_text()
            .map(str::to_string)
            .unwrap_or_else(|| format_form_date(context.today()));

        let description = extracted.merchant_text().map(str::to_string).unwrap_or_default();

        let amount = extracted
            .total
            .map(|total| total.normalize().to_string())
            .unwrap_or_default();

        Self {
            claimant_name: context.last_claimant().to_string(),
            date,
            description,
            amount,
            payment_method: PaymentMethod::Cash,
            remarks: String::new(),
            ref_no: None,
        }
    }

    /// Validates the form and converts it into claim fields
    ///
    /// The amount never fails: unparsable text becomes zero.
    pub fn into_new_claim(self) -> Result<NewClaimItem, ClaimError> {
        self.validate()?;

        let ref_no = self
            .ref_no
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        Ok(NewClaimItem {
            date: self.date.trim().to_string(),
            description: self.description.trim().to_string(),
            amount: Amount::parse_lenient(&self.amount),
            payment_method: self.payment_method,
            remarks: self.remarks.trim().to_string(),
            claimant_name: self.claimant_name.trim().to_string(),
            ref_no,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::FixedClock;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn context(last_claimant: &str) -> SessionContext {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let mut context = SessionContext::new(Arc::new(clock));
        context.remember_claimant(last_claimant);
        context
    }

    #[test]
    fn test_seeded_from_extraction() {
        let extracted = ExtractedReceiptData {
            date: Some("05.10.2026".to_string()),
            merchant: Some("Tesco".to_string()),
            total: Some(dec!(12.40)),
        };

        let form = ClaimForm::seeded(&extracted, &context("Ali"));
        assert_eq!(form.date, "05.10.2026");
        assert_eq!(form.description, "Tesco");
        assert_eq!(form.amount, "12.4");
        assert_eq!(form.claimant_name, "Ali");
        assert_eq!(form.payment_method, PaymentMethod::Cash);
    }

    #[test]
    fn test_seeded_defaults_when_nothing_extracted() {
        let form = ClaimForm::seeded(&ExtractedReceiptData::empty(), &context(""));
        assert_eq!(form.date, "19.10.2026");
        assert_eq!(form.description, "");
        assert_eq!(form.amount, "");
        assert_eq!(form.claimant_name, "");
    }

    #[test]
    fn test_unparsable_amount_becomes_zero() {
        let form = ClaimForm {
            claimant_name: "Ali".to_string(),
            date: "19.10.2026".to_string(),
            description: "Lunch".to_string(),
            amount: "abc".to_string(),
            ..Default::default()
        };

        let claim = form.into_new_claim().unwrap();
        assert!(claim.amount.is_zero());
    }

    #[test]
    fn test_blank_required_fields_rejected() {
        let form = ClaimForm {
            claimant_name: "   ".to_string(),
            date: "19.10.2026".to_string(),
            description: String::new(),
            ..Default::default()
        };

        let error = form.into_new_claim().unwrap_err();
        assert_eq!(error.invalid_fields(), vec!["claimant_name", "description"]);
    }

    #[test]
    fn test_blank_ref_no_dropped() {
        let form = ClaimForm {
            claimant_name: "Mei".to_string(),
            date: "19.10.2026".to_string(),
            description: "Taxi".to_string(),
            amount: "15".to_string(),
            ref_no: Some(" ".to_string()),
            ..Default::default()
        };

        assert_eq!(form.into_new_claim().unwrap().ref_no, None);
    }
}
