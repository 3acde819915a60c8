//! Comprehensive tests for domain_claims

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::sync::Arc;

use core_kernel::{Amount, ClaimItemId, FixedClock};

use domain_claims::capture::{CapturePhase, CaptureState};
use domain_claims::claim::{ClaimItem, NewClaimItem, PaymentMethod};
use domain_claims::error::ClaimError;
use domain_claims::extraction::ExtractedReceiptData;
use domain_claims::form::ClaimForm;
use domain_claims::session::ClaimSession;
use domain_claims::store::ClaimStore;

fn new_session() -> ClaimSession {
    ClaimSession::new(Arc::new(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())))
}

fn new_claim(claimant: &str, amount: &str, method: PaymentMethod) -> ClaimItem {
    ClaimItem::new(NewClaimItem {
        date: "18.10.2026".to_string(),
        description: "Toll".to_string(),
        amount: Amount::parse_lenient(amount),
        payment_method: method,
        remarks: String::new(),
        claimant_name: claimant.to_string(),
        ref_no: None,
    })
}

// ============================================================================
// Payment Method Tests
// ============================================================================

mod payment_method_tests {
    use super::*;

    #[test]
    fn test_serializes_as_labels() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Cash).unwrap(), "\"Cash\"");
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CreditCard).unwrap(),
            "\"Credit Card\""
        );
    }

    #[test]
    fn test_deserializes_aliases() {
        let method: PaymentMethod = serde_json::from_str("\"credit_card\"").unwrap();
        assert_eq!(method, PaymentMethod::CreditCard);
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_spacing() {
        assert_eq!("credit card".parse::<PaymentMethod>().unwrap(), PaymentMethod::CreditCard);
        assert_eq!("CREDIT-CARD".parse::<PaymentMethod>().unwrap(), PaymentMethod::CreditCard);
        assert_eq!(" Cash ".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
    }

    #[test]
    fn test_parse_unknown_method() {
        let result = "cheque".parse::<PaymentMethod>();
        assert!(matches!(result, Err(ClaimError::UnknownPaymentMethod(m)) if m == "cheque"));
    }
}

// ============================================================================
// Claim Item Tests
// ============================================================================

mod claim_item_tests {
    use super::*;

    #[test]
    fn test_amount_for_matching_method_only() {
        let claim = new_claim("Ali", "42.10", PaymentMethod::CreditCard);

        assert_eq!(claim.amount_for(PaymentMethod::CreditCard), Some(claim.amount));
        assert_eq!(claim.amount_for(PaymentMethod::Cash), None);
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        let first = new_claim("Ali", "1", PaymentMethod::Cash);
        let second = new_claim("Ali", "1", PaymentMethod::Cash);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_ref_no_or_empty() {
        let mut claim = new_claim("Ali", "1", PaymentMethod::Cash);
        assert_eq!(claim.ref_no_or_empty(), "");

        claim.ref_no = Some("INV-0042".to_string());
        assert_eq!(claim.ref_no_or_empty(), "INV-0042");
    }
}

// ============================================================================
// Claim Store Tests
// ============================================================================

mod store_tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut store = ClaimStore::new();
        store.append(new_claim("Ali", "50", PaymentMethod::Cash));
        store.append(new_claim("Mei", "20", PaymentMethod::Cash));
        store.append(new_claim("Ali", "30", PaymentMethod::CreditCard));

        let claimants: Vec<&str> = store.iter().map(|c| c.claimant_name.as_str()).collect();
        assert_eq!(claimants, vec!["Ali", "Mei", "Ali"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_remove_existing_claim() {
        let mut store = ClaimStore::new();
        let id = store.append(new_claim("Ali", "50", PaymentMethod::Cash)).id;
        store.append(new_claim("Mei", "20", PaymentMethod::Cash));

        let removed = store.remove(id).unwrap();
        assert_eq!(removed.claimant_name, "Ali");
        assert_eq!(store.len(), 1);
        assert!(store.get(id).is_none());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut store = ClaimStore::new();
        store.append(new_claim("Ali", "50", PaymentMethod::Cash));

        assert!(store.remove(ClaimItemId::new()).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_totals_follow_removal() {
        let mut store = ClaimStore::new();
        store.append(new_claim("Ali", "50", PaymentMethod::Cash));
        let card_id = store.append(new_claim("Ali", "30", PaymentMethod::CreditCard)).id;
        store.append(new_claim("Mei", "20", PaymentMethod::Cash));

        let totals = store.totals();
        assert_eq!(totals.cash.value(), dec!(70));
        assert_eq!(totals.credit_card.value(), dec!(30));

        store.remove(card_id);
        let totals = store.totals();
        assert_eq!(totals.cash.to_string(), "70.00");
        assert_eq!(totals.credit_card.to_string(), "0.00");
    }

    #[test]
    fn test_empty_store() {
        let store = ClaimStore::new();
        assert!(store.is_empty());
        assert_eq!(store.totals().grand_total().to_string(), "0.00");
    }
}

// ============================================================================
// Session Tests
// ============================================================================

mod session_tests {
    use super::*;

    fn confirm_manual(session: &mut ClaimSession, claimant: &str, amount: &str, method: PaymentMethod) {
        let mut form = session.start_manual_entry().unwrap().clone();
        form.claimant_name = claimant.to_string();
        form.description = "Parking".to_string();
        form.amount = amount.to_string();
        form.payment_method = method;
        session.confirm(form).unwrap();
    }

    #[test]
    fn test_extraction_seeds_form() {
        let mut session = new_session();
        let ticket = session.begin_extraction().unwrap();

        let extracted = ExtractedReceiptData {
            date: Some("12.10.2026".to_string()),
            merchant: Some("Shell Bangsar".to_string()),
            total: Some(dec!(85.20)),
        };
        let form = session.complete_extraction(ticket, extracted).unwrap();

        assert_eq!(form.date, "12.10.2026");
        assert_eq!(form.description, "Shell Bangsar");
        assert_eq!(form.amount, "85.2");
        assert_eq!(form.payment_method, PaymentMethod::Cash);
    }

    #[test]
    fn test_empty_extraction_uses_defaults() {
        let mut session = new_session();
        let ticket = session.begin_extraction().unwrap();

        let form = session.complete_extraction(ticket, ExtractedReceiptData::empty()).unwrap();

        assert_eq!(form.date, "19.10.2026");
        assert!(form.description.is_empty());
        assert!(form.amount.is_empty());
        assert!(form.claimant_name.is_empty());
    }

    #[test]
    fn test_last_claimant_becomes_default() {
        let mut session = new_session();
        confirm_manual(&mut session, "Ali", "50", PaymentMethod::Cash);

        let form = session.start_manual_entry().unwrap();
        assert_eq!(form.claimant_name, "Ali");
        assert_eq!(session.context().last_claimant(), "Ali");
    }

    #[test]
    fn test_unparsable_amount_recorded_as_zero() {
        let mut session = new_session();
        confirm_manual(&mut session, "Ali", "abc", PaymentMethod::Cash);

        assert_eq!(session.claims().len(), 1);
        assert!(session.claims()[0].amount.is_zero());
    }

    #[test]
    fn test_cancel_creates_nothing() {
        let mut session = new_session();
        session.start_manual_entry().unwrap();
        session.cancel();

        assert!(session.claims().is_empty());
        assert_eq!(session.state(), &CaptureState::Idle);
    }

    #[test]
    fn test_scenario_totals() {
        let mut session = new_session();
        confirm_manual(&mut session, "Ali", "50", PaymentMethod::Cash);
        confirm_manual(&mut session, "Mei", "20", PaymentMethod::Cash);
        confirm_manual(&mut session, "Ali", "30", PaymentMethod::CreditCard);

        let totals = session.totals();
        assert_eq!(totals.cash.to_string(), "70.00");
        assert_eq!(totals.credit_card.to_string(), "30.00");
        assert_eq!(session.context().last_claimant(), "Ali");
    }

    #[test]
    fn test_remove_claim_unknown_id() {
        let mut session = new_session();
        confirm_manual(&mut session, "Mei", "20", PaymentMethod::Cash);

        assert!(session.remove_claim(ClaimItemId::new()).is_none());
        assert_eq!(session.claims().len(), 1);
    }

    #[test]
    fn test_rejected_submit_stays_awaiting_confirmation() {
        let mut session = new_session();
        session.start_manual_entry().unwrap();

        let result = session.confirm(ClaimForm::default());
        assert!(matches!(result, Err(ClaimError::Validation(_))));
        assert_eq!(session.state().phase(), CapturePhase::AwaitingConfirmation);
        assert!(session.claims().is_empty());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn method_strategy() -> impl Strategy<Value = PaymentMethod> {
        prop_oneof![Just(PaymentMethod::Cash), Just(PaymentMethod::CreditCard)]
    }

    proptest! {
        #[test]
        fn totals_sum_to_list_total(
            entries in prop::collection::vec((0u64..1_000_000, method_strategy()), 0..30)
        ) {
            let mut store = ClaimStore::new();
            for (minor, method) in &entries {
                store.append(new_claim("Ali", &Amount::from_minor(*minor).to_string(), *method));
            }

            let totals = store.totals();
            let list_total: Amount = store.iter().map(|c| c.amount).sum();
            prop_assert_eq!(totals.grand_total(), list_total);
        }
    }
}
