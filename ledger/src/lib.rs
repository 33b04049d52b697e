//! Abstract custody ledger for votepool.
//!
//! The engine never owns balances directly. Every movement of value, whether a
//! deposit, refund, swap leg or payout, is a [`Transfer`] applied through a
//! [`Ledger`] implementation. The rest of the codebase depends only on the trait;
//! an in-memory implementation lives in `votepool-nullables`.

pub mod error;
pub mod transfer;

pub use error::LedgerError;
pub use transfer::Transfer;

use votepool_types::{AccountId, Asset};

/// Balance-keeping collaborator.
///
/// Implementations must apply a batch atomically: either every transfer in
/// the slice takes effect, or none does and an error is returned.
pub trait Ledger: Send + Sync {
    /// Current balance of `account` in `asset`. Unknown accounts hold zero.
    fn balance(&self, account: &AccountId, asset: &Asset) -> u128;

    /// Apply a batch of transfers all-or-nothing.
    fn apply(&self, transfers: &[Transfer]) -> Result<(), LedgerError>;

    /// Apply a single transfer.
    fn transfer(&self, transfer: Transfer) -> Result<(), LedgerError> {
        self.apply(std::slice::from_ref(&transfer))
    }
}
