use serde::{Deserialize, Serialize};
use votepool_ledger::Transfer;
use votepool_types::{AccountId, AssetId, Timestamp};

/// Parameters of a single conversion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    /// Account the base-currency input is taken from.
    pub payer: AccountId,
    /// Account the output asset is delivered to.
    pub recipient: AccountId,
    /// Base-currency amount to convert.
    pub input: u128,
    /// Smallest acceptable output; anything less must fail.
    pub min_output: u128,
    pub output_asset: AssetId,
    /// The exchange must refuse to execute strictly after this time.
    pub deadline: Timestamp,
}

/// A priced conversion, ready to be committed through a ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapPlan {
    /// Output the legs deliver to the recipient.
    pub output: u128,
    /// Transfers to apply, in order, as part of a single batch.
    pub legs: Vec<Transfer>,
}
