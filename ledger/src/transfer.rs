//! A single movement of value between two accounts.

use serde::{Deserialize, Serialize};
use votepool_types::{AccountId, Asset};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub asset: Asset,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: u128,
}

impl Transfer {
    pub fn new(asset: Asset, from: &AccountId, to: &AccountId, amount: u128) -> Self {
        Self {
            asset,
            from: from.clone(),
            to: to.clone(),
            amount,
        }
    }

    /// Zero-amount transfers are skipped by batch builders.
    pub fn is_noop(&self) -> bool {
        self.amount == 0
    }
}
