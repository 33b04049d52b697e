//! Settlement arithmetic: fee deduction and pro-rata distribution.
//!
//! Everything here is pure. The engine computes a full payout plan before
//! moving any funds, so a failure leaves the round untouched.

use crate::contributions::Contributions;
use crate::error::RoundError;
use serde::{Deserialize, Serialize};
use votepool_types::{apply_bps, mul_div_floor, AccountId, Asset};

/// An amount split into the owner's fee and what remains.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSplit {
    pub fee: u128,
    pub remainder: u128,
}

/// Take `fee_bps` basis points of `amount`, rounding the fee down.
pub fn split_fee(amount: u128, fee_bps: u32) -> Result<FeeSplit, RoundError> {
    let fee = apply_bps(amount, fee_bps).ok_or(RoundError::Overflow)?;
    let remainder = amount.checked_sub(fee).ok_or(RoundError::Overflow)?;
    Ok(FeeSplit { fee, remainder })
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub participant: AccountId,
    pub amount: u128,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    /// One entry per participant, in participant order. Zero shares included.
    pub payouts: Vec<Payout>,
    pub distributed: u128,
    /// `amount - distributed`, left over from flooring each share.
    pub dust: u128,
}

/// Split `amount` across participants pro-rata to their contributions.
///
/// Each share is `floor(amount * contribution / total)`, so the shares never
/// sum to more than `amount`; dust is strictly less than the participant count.
pub fn distribute(amount: u128, contributions: &Contributions) -> Result<Distribution, RoundError> {
    let total = contributions.total();
    if total == 0 {
        return Err(RoundError::EmptyPool);
    }
    let mut payouts = Vec::with_capacity(contributions.participants_count());
    let mut distributed: u128 = 0;
    for (participant, contribution) in contributions.iter() {
        let share = mul_div_floor(amount, contribution, total).ok_or(RoundError::Overflow)?;
        distributed = distributed.checked_add(share).ok_or(RoundError::Overflow)?;
        payouts.push(Payout {
            participant: participant.clone(),
            amount: share,
        });
    }
    let dust = amount.checked_sub(distributed).ok_or(RoundError::Overflow)?;
    Ok(Distribution {
        payouts,
        distributed,
        dust,
    })
}

/// What a successful settlement did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReport {
    pub winner: usize,
    pub target: Asset,
    /// Base currency held when settlement started.
    pub pool: u128,
    /// Base currency handed to the exchange (zero for a native winner).
    pub swap_input: u128,
    /// Target asset available for fee and distribution.
    pub output: u128,
    pub fee: u128,
    pub fee_asset: Asset,
    pub distributed: u128,
    /// Rounding remainder swept to the owner in the target asset.
    pub dust: u128,
    pub payouts: Vec<Payout>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contributions(entries: &[(&str, u128)]) -> Contributions {
        let mut c = Contributions::new();
        for (name, amount) in entries {
            c.credit(&AccountId::new(*name), *amount).unwrap();
        }
        c
    }

    #[test]
    fn fee_rounds_down() {
        assert_eq!(
            split_fee(1_999, 100).unwrap(),
            FeeSplit {
                fee: 19,
                remainder: 1_980
            }
        );
    }

    #[test]
    fn shares_follow_contribution_ratio() {
        let c = contributions(&[("alice", 2), ("bob", 4)]);
        let d = distribute(600, &c).unwrap();
        assert_eq!(d.payouts[0].amount, 200);
        assert_eq!(d.payouts[1].amount, 400);
        assert_eq!(d.dust, 0);
    }

    #[test]
    fn flooring_leaves_dust() {
        let c = contributions(&[("a", 1), ("b", 1), ("c", 1)]);
        let d = distribute(100, &c).unwrap();
        assert!(d.payouts.iter().all(|p| p.amount == 33));
        assert_eq!(d.distributed, 99);
        assert_eq!(d.dust, 1);
    }

    #[test]
    fn empty_contributions_cannot_be_distributed() {
        assert_eq!(
            distribute(100, &Contributions::new()),
            Err(RoundError::EmptyPool)
        );
    }

    #[test]
    fn tiny_contribution_can_floor_to_zero() {
        let c = contributions(&[("whale", 1_000_000), ("minnow", 1)]);
        let d = distribute(10, &c).unwrap();
        let minnow = d.payouts.iter().find(|p| p.participant.as_str() == "minnow").unwrap();
        assert_eq!(minnow.amount, 0);
        assert_eq!(d.distributed + d.dust, 10);
    }
}
