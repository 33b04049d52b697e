//! Per-participant contribution totals.
//!
//! Membership in the participant set is exactly "has a non-zero entry here";
//! the participant count is the number of entries. Keys are ordered so
//! payouts and snapshots come out in a stable order.

use crate::error::RoundError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use votepool_types::AccountId;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributions {
    by_participant: BTreeMap<AccountId, u128>,
    total: u128,
}

impl Contributions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total contributed by `participant`; zero for strangers.
    pub fn of(&self, participant: &AccountId) -> u128 {
        self.by_participant.get(participant).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u128 {
        self.total
    }

    pub fn participants_count(&self) -> usize {
        self.by_participant.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_participant.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AccountId, u128)> {
        self.by_participant.iter().map(|(id, amount)| (id, *amount))
    }

    /// Add `amount` to `participant`. A zero amount changes nothing and does
    /// not enrol the participant.
    pub fn credit(&mut self, participant: &AccountId, amount: u128) -> Result<(), RoundError> {
        if amount == 0 {
            return Ok(());
        }
        let current = self.of(participant);
        let updated = current.checked_add(amount).ok_or(RoundError::Overflow)?;
        let total = self.total.checked_add(amount).ok_or(RoundError::Overflow)?;
        self.by_participant.insert(participant.clone(), updated);
        self.total = total;
        Ok(())
    }

    /// Remove `participant` and return what they had contributed.
    pub fn take(&mut self, participant: &AccountId) -> Option<u128> {
        let amount = self.by_participant.remove(participant)?;
        self.total -= amount;
        Some(amount)
    }

    pub fn clear(&mut self) {
        self.by_participant.clear();
        self.total = 0;
    }
}
