//! Round phases and the guards between them.

use crate::error::RoundError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle phase of the current round.
///
/// ```text
/// Idle ──reset──▶ Open ──execute──────▶ Closed
///                  │
///                  └──allow_refund──▶ Refundable
/// ```
///
/// `reset` leads back to `Open` from every phase once no funds are outstanding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No round has been configured yet.
    #[default]
    Idle,
    /// Deposits (votes) are accepted.
    Open,
    /// The round was cancelled; participants can be refunded one by one.
    Refundable,
    /// The round was settled.
    Closed,
}

impl Phase {
    pub fn is_open(self) -> bool {
        self == Self::Open
    }

    pub fn refunds_enabled(self) -> bool {
        self == Self::Refundable
    }

    /// Fail with [`RoundError::InvalidPhase`] unless in `expected`.
    pub fn require(self, expected: Phase) -> Result<(), RoundError> {
        if self == expected {
            Ok(())
        } else {
            Err(RoundError::InvalidPhase {
                expected,
                actual: self,
            })
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Open => "open",
            Self::Refundable => "refundable",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}
