//! Deposit ceilings.
//!
//! The cap bounds how large the pool can grow, which bounds the price impact
//! of the single conversion at settlement. Which quantity is capped is a
//! configuration choice.

use crate::error::RoundError;
use crate::round::Round;
use serde::{Deserialize, Serialize};
use votepool_types::AccountId;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum CapPolicy {
    /// No ceiling.
    #[default]
    Disabled,
    /// A participant's total across all projects may not exceed `limit`.
    PerParticipant { limit: u128 },
    /// A single project's pooled balance may not exceed `limit`.
    PerProject { limit: u128 },
    /// The whole pool may not exceed `limit`.
    RoundTotal { limit: u128 },
}

impl CapPolicy {
    /// Check that depositing `amount` into `project` by `participant` stays
    /// within the ceiling. `project` must already be a valid index.
    pub fn check(
        &self,
        round: &Round,
        participant: &AccountId,
        project: usize,
        amount: u128,
    ) -> Result<(), RoundError> {
        let (current, limit) = match *self {
            Self::Disabled => return Ok(()),
            Self::PerParticipant { limit } => (round.contributions.of(participant), limit),
            Self::PerProject { limit } => (round.projects[project].pooled_balance, limit),
            Self::RoundTotal { limit } => (round.contributions.total(), limit),
        };
        let attempted = current.checked_add(amount).ok_or(RoundError::Overflow)?;
        if attempted > limit {
            return Err(RoundError::CapExceeded { attempted, limit });
        }
        Ok(())
    }
}
