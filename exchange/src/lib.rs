//! Currency-exchange collaborator used at settlement.
//!
//! An exchange never moves funds itself. It prices a request and answers with
//! the transfer legs that would carry it out; the engine commits those legs in
//! the same ledger batch as the settlement payouts, so a conversion takes
//! effect exactly when the whole settlement does.
//!
//! A plan is refused past the caller's deadline or below the caller's minimum
//! output. How the exchange prices a conversion is its own business.

pub mod error;
pub mod request;
pub mod slippage;

pub use error::ExchangeError;
pub use request::{SwapPlan, SwapRequest};
pub use slippage::min_output_for;

use votepool_types::AssetId;

/// Trait for converting base currency into an external asset.
pub trait Exchanger: Send + Sync {
    /// Expected output for converting `input` base currency into `output_asset`
    /// at current prices. Advisory only; a plan may deliver less.
    fn quote(&self, input: u128, output_asset: &AssetId) -> Result<u128, ExchangeError>;

    /// Price `request` and return the legs that move `request.input` base
    /// currency out of `request.payer` and the output into
    /// `request.recipient`. Nothing happens until the caller applies them.
    fn plan(&self, request: &SwapRequest) -> Result<SwapPlan, ExchangeError>;

    /// Human-readable name of this exchange.
    fn name(&self) -> &str;
}
