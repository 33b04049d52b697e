//! Journal of what each successful operation did.

use crate::settlement::SettlementReport;
use serde::{Deserialize, Serialize};
use votepool_types::{AccountId, Asset, Timestamp};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoundEvent {
    RoundReset {
        targets: Vec<Asset>,
        estimated_timestamp: Timestamp,
    },
    Deposited {
        participant: AccountId,
        project: usize,
        amount: u128,
    },
    RefundsEnabled,
    Refunded {
        participant: AccountId,
        amount: u128,
    },
    Settled(SettlementReport),
}
