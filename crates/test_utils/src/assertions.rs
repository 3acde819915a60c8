//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use rust_decimal::Decimal;

use core_kernel::Amount;
use domain_claims::{ClaimItem, PaymentTotals};

/// Asserts that an amount equals the given decimal text
///
/// # Panics
///
/// Panics if `expected` is not a decimal or the values differ
pub fn assert_amount_eq(actual: Amount, expected: &str) {
    let expected: Decimal = expected
        .parse()
        .unwrap_or_else(|_| panic!("Expected amount is not a decimal: {expected}"));
    assert_eq!(
        actual.value(),
        expected,
        "Amount mismatch: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts the Cash and Credit Card totals
pub fn assert_totals(totals: &PaymentTotals, cash: &str, credit_card: &str) {
    assert_eq!(
        (totals.cash.to_string().as_str(), totals.credit_card.to_string().as_str()),
        (cash, credit_card),
        "Totals mismatch (cash, credit card)"
    );
}

/// Asserts that claims appear in the given claimant order
pub fn assert_claimant_order(claims: &[ClaimItem], expected: &[&str]) {
    let actual: Vec<&str> = claims.iter().map(|c| c.claimant_name.as_str()).collect();
    assert_eq!(actual, expected, "Claimant order mismatch");
}

/// Asserts that a grand total equals the sum over every claim
pub fn assert_grand_total_matches(claims: &[ClaimItem], totals: &PaymentTotals) {
    let expected = PaymentTotals::compute(claims);
    assert_eq!(
        totals, &expected,
        "Totals do not match the sum over all {} claims",
        claims.len()
    );
}
