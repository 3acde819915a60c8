//! Stable grouping of claims by claimant
//!
//! Groups appear in order of each claimant's first claim; claims keep their
//! list order within a group. Names are compared exactly.

use std::collections::HashMap;

use domain_claims::{ClaimItem, PaymentTotals};

/// One claimant's claims, in list order
#[derive(Debug, Clone)]
pub struct ClaimantGroup<'a> {
    pub claimant: &'a str,
    pub claims: Vec<&'a ClaimItem>,
}

impl<'a> ClaimantGroup<'a> {
    /// Subtotals for this claimant
    pub fn totals(&self) -> PaymentTotals {
        PaymentTotals::compute(self.claims.iter().copied())
    }
}

/// Claims grouped by claimant, in order of first appearance
#[derive(Debug, Clone, Default)]
pub struct ClaimantGroups<'a> {
    groups: Vec<ClaimantGroup<'a>>,
}

impl<'a> ClaimantGroups<'a> {
    pub fn from_claims(claims: &'a [ClaimItem]) -> Self {
        let mut groups: Vec<ClaimantGroup<'a>> = Vec::new();
        let mut index: HashMap<&'a str, usize> = HashMap::new();

        for claim in claims {
            let name = claim.claimant_name.as_str();
            let slot = *index.entry(name).or_insert_with(|| {
                groups.push(ClaimantGroup {
                    claimant: name,
                    claims: Vec::new(),
                });
                groups.len() - 1
            });
            groups[slot].claims.push(claim);
        }

        Self { groups }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClaimantGroup<'a>> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Claimant names in group order
    pub fn claimants(&self) -> Vec<&'a str> {
        self.groups.iter().map(|group| group.claimant).collect()
    }
}

impl<'g, 'a> IntoIterator for &'g ClaimantGroups<'a> {
    type Item = &'g ClaimantGroup<'a>;
    type IntoIter = std::slice::Iter<'g, ClaimantGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
