//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the claims suites. These fixtures are
//! deterministic so that report layouts and totals can be asserted exactly.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::sync::Arc;

use core_kernel::{Clock, FixedClock};
use domain_claims::{ClaimItem, ExtractedReceiptData, PaymentMethod, ReceiptImage};

use crate::builders::ClaimItemBuilder;

/// Fixture for business dates
pub struct DateFixtures;

impl DateFixtures {
    /// The pinned "today" used across suites (19 Oct 2026)
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid fixture date")
    }

    /// `today()` as the claim form shows it
    pub fn today_form_text() -> &'static str {
        "19.10.2026"
    }

    /// `today()` as the report title shows it
    pub fn today_title_text() -> &'static str {
        "19/10/2026"
    }

    /// A clock pinned to `today()`
    pub fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(Self::today()))
    }
}

/// Fixture for complete claim lists
pub struct ScenarioFixtures;

impl ScenarioFixtures {
    /// Ali 50 Cash, Mei 20 Cash, Ali 30 Credit Card, in that order
    pub fn ali_mei_claims() -> Vec<ClaimItem> {
        vec![
            ClaimItemBuilder::new()
                .with_claimant("Ali")
                .with_description("Petrol")
                .with_amount("50")
                .with_method(PaymentMethod::Cash)
                .build(),
            ClaimItemBuilder::new()
                .with_claimant("Mei")
                .with_description("Stationery")
                .with_amount("20")
                .with_method(PaymentMethod::Cash)
                .build(),
            ClaimItemBuilder::new()
                .with_claimant("Ali")
                .with_description("Client lunch")
                .with_amount("30")
                .with_method(PaymentMethod::CreditCard)
                .build(),
        ]
    }

    /// A single zero-amount cash claim
    pub fn zero_amount_claim() -> Vec<ClaimItem> {
        vec![ClaimItemBuilder::new()
            .with_claimant("Ali")
            .with_description("Free parking")
            .with_amount("0")
            .build()]
    }
}

/// Fixture for receipt uploads and extraction results
pub struct ReceiptFixtures;

impl ReceiptFixtures {
    /// Minimal JPEG header bytes; content is never decoded
    pub fn jpeg_bytes() -> Vec<u8> {
        vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00]
    }

    pub fn jpeg() -> ReceiptImage {
        ReceiptImage::new(Self::jpeg_bytes(), "image/jpeg")
    }

    /// An extraction that found every field
    pub fn full_extraction() -> ExtractedReceiptData {
        ExtractedReceiptData {
            date: Some("12.10.2026".to_string()),
            merchant: Some("Shell Bangsar".to_string()),
            total: Some(dec!(85.20)),
        }
    }
}
