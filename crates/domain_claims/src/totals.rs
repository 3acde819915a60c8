//! Running totals for the claims list

use serde::{Deserialize, Serialize};

use core_kernel::Amount;
use crate::claim::{ClaimItem, PaymentMethod};

/// Sum of claim amounts per payment method
///
/// Always recomputed from the full list; nothing is maintained incrementally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTotals {
    pub cash: Amount,
    pub credit_card: Amount,
}

impl PaymentTotals {
    pub fn compute<'a>(claims: impl IntoIterator<Item = &'a ClaimItem>) -> Self {
        claims.into_iter().fold(Self::default(), |mut totals, claim| {
            totals.add(claim.payment_method, claim.amount);
            totals
        })
    }

    /// Adds `amount` to the bucket for `method`
    pub fn add(&mut self, method: PaymentMethod, amount: Amount) {
        match method {
            PaymentMethod::Cash => self.cash += amount,
            PaymentMethod::CreditCard => self.credit_card += amount,
        }
    }

    pub fn for_method(&self, method: PaymentMethod) -> Amount {
        match method {
            PaymentMethod::Cash => self.cash,
            PaymentMethod::CreditCard => self.credit_card,
        }
    }

    /// Cash plus credit card
    pub fn grand_total(&self) -> Amount {
        self.cash + self.credit_card
    }
}

impl std::ops::Add for PaymentTotals {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            cash: self.cash + other.cash,
            credit_card: self.credit_card + other.credit_card,
        }
    }
}
