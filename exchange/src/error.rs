use thiserror::Error;
use votepool_types::Timestamp;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("deadline {deadline} has passed (now {now})")]
    DeadlineExpired { deadline: Timestamp, now: Timestamp },

    #[error("output {output} below minimum {min_output}")]
    InsufficientOutput { output: u128, min_output: u128 },

    #[error("no market for asset {0}")]
    UnsupportedAsset(String),

    #[error("quote for {input} input rounds to zero output")]
    ZeroQuote { input: u128 },

    #[error("{0}")]
    Other(String),
}
