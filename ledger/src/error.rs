use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient {asset} balance in {account}: need {needed}, have {available}")]
    InsufficientBalance {
        account: String,
        asset: String,
        needed: u128,
        available: u128,
    },

    #[error("balance overflow crediting {account}")]
    Overflow { account: String },

    #[error("transfer from {0} to itself")]
    SelfTransfer(String),

    #[error("ledger backend error: {0}")]
    Backend(String),
}
