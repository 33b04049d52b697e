//! Round engine errors.

use crate::phase::Phase;
use thiserror::Error;
use votepool_exchange::ExchangeError;
use votepool_ledger::LedgerError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoundError {
    #[error("caller {0} is not the owner")]
    Unauthorized(String),

    #[error("round is {actual}, operation requires {expected}")]
    InvalidPhase { expected: Phase, actual: Phase },

    #[error("project index {index} out of range ({count} projects)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("deposit exceeds maximum limit: {attempted} > {limit}")]
    CapExceeded { attempted: u128, limit: u128 },

    #[error("nothing to refund for {0}")]
    NothingToRefund(String),

    #[error("invalid round configuration: {0}")]
    InvalidConfiguration(String),

    #[error("exchange failed: {0}")]
    ExchangeFailed(#[from] ExchangeError),

    #[error("nothing to settle: the pool is empty")]
    EmptyPool,

    #[error("{participants} participants still hold funds in the current round")]
    FundsOutstanding { participants: usize },

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("arithmetic overflow in round accounting")]
    Overflow,

    #[error("config error: {0}")]
    Config(String),
}
