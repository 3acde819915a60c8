//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating claim lists that respect
//! domain invariants (non-negative amounts, non-empty claimant names).

use proptest::prelude::*;

use core_kernel::Amount;
use domain_claims::{ClaimItem, PaymentMethod};

use crate::builders::ClaimItemBuilder;

/// Strategy for generating payment methods
pub fn payment_method_strategy() -> impl Strategy<Value = PaymentMethod> {
    prop_oneof![Just(PaymentMethod::Cash), Just(PaymentMethod::CreditCard)]
}

/// Strategy for generating amounts in minor units, zero included
pub fn amount_strategy() -> impl Strategy<Value = Amount> {
    prop_oneof![
        1 => Just(Amount::zero()),
        9 => (1u64..10_000_000u64).prop_map(Amount::from_minor),
    ]
}

/// Strategy for picking claimant names from a small pool so groups repeat
pub fn claimant_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Ali", "Mei", "Kumar", "Siti", "Tan"]).prop_map(|name| name.to_string())
}

/// Strategy for generating a single claim
pub fn claim_strategy() -> impl Strategy<Value = ClaimItem> {
    (
        claimant_strategy(),
        amount_strategy(),
        payment_method_strategy(),
        "[A-Za-z ]{1,20}",
    )
        .prop_map(|(claimant, amount, method, description)| {
            ClaimItemBuilder::new()
                .with_claimant(claimant)
                .with_amount_value(amount)
                .with_method(method)
                .with_description(description)
                .build()
        })
}

/// Strategy for generating an ordered claim list
pub fn claims_strategy(max_len: usize) -> impl Strategy<Value = Vec<ClaimItem>> {
    prop::collection::vec(claim_strategy(), 0..=max_len)
}

/// Strategy for generating a claim list with at least one claim
pub fn non_empty_claims_strategy(max_len: usize) -> impl Strategy<Value = Vec<ClaimItem>> {
    prop::collection::vec(claim_strategy(), 1..=max_len.max(1))
}
