//! Session claim store
//!
//! An ordered, in-memory list of confirmed claims. Order is confirmation
//! order and is what the list view and the export both walk.

use tracing::{debug, info};

use core_kernel::ClaimItemId;
use crate::claim::ClaimItem;
use crate::totals::PaymentTotals;

/// Ordered collection of confirmed claims for one session
#[derive(Debug, Clone, Default)]
pub struct ClaimStore {
    items: Vec<ClaimItem>,
}

impl ClaimStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a confirmed claim to the end of the list
    pub fn append(&mut self, item: ClaimItem) -> &ClaimItem {
        info!(
            claim_id = %item.id,
            claimant = %item.claimant_name,
            amount = %item.amount,
            method = %item.payment_method,
            "Claim appended"
        );
        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    /// Removes the claim with `id`; returns `None` and changes nothing if absent
    pub fn remove(&mut self, id: ClaimItemId) -> Option<ClaimItem> {
        let Some(position) = self.items.iter().position(|item| item.id == id) else {
            debug!(claim_id = %id, "Remove requested for unknown claim");
            return None;
        };
        let removed = self.items.remove(position);
        info!(claim_id = %id, claimant = %removed.claimant_name, "Claim removed");
        Some(removed)
    }

    pub fn get(&self, id: ClaimItemId) -> Option<&ClaimItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClaimItem> {
        self.items.iter()
    }

    /// Snapshot of the claims in order
    pub fn claims(&self) -> &[ClaimItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Running totals per payment method
    pub fn totals(&self) -> PaymentTotals {
        PaymentTotals::compute(&self.items)
    }
}

impl<'a> IntoIterator for &'a ClaimStore {
    type Item = &'a ClaimItem;
    type IntoIter = std::slice::Iter<'a, ClaimItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
