//! Engine configuration with TOML file support.

use crate::cap::CapPolicy;
use crate::error::RoundError;
use serde::{Deserialize, Serialize};
use votepool_types::{AccountId, BPS_DENOMINATOR};

/// Which amount the platform fee is taken from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeBasis {
    /// Fee taken in base currency from the pool before conversion.
    #[default]
    Pool,
    /// Fee taken in the target asset from the conversion output.
    Output,
}

/// Configuration for a [`VotingRound`](crate::VotingRound).
///
/// Can be loaded from a TOML file via [`EngineConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The only account allowed to reset, cancel or settle rounds.
    pub owner: AccountId,

    /// Custody account holding deposits until settlement or refund.
    #[serde(default = "default_account")]
    pub account: AccountId,

    /// Platform fee in basis points.
    #[serde(default = "default_fee_bps")]
    pub fee_bps: u32,

    #[serde(default)]
    pub fee_basis: FeeBasis,

    /// Largest accepted shortfall against the exchange quote, in basis points.
    #[serde(default = "default_max_slippage_bps")]
    pub max_slippage_bps: u32,

    #[serde(default)]
    pub cap: CapPolicy,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_account() -> AccountId {
    AccountId::new("votepool")
}

fn default_fee_bps() -> u32 {
    100
}

fn default_max_slippage_bps() -> u32 {
    300
}

// ── Impl ───────────────────────────────────────────────────────────────

impl EngineConfig {
    /// A config with defaults for everything but the owner.
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            account: default_account(),
            fee_bps: default_fee_bps(),
            fee_basis: FeeBasis::default(),
            max_slippage_bps: default_max_slippage_bps(),
            cap: CapPolicy::default(),
        }
    }

    pub fn with_cap(mut self, cap: CapPolicy) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_fee(mut self, fee_bps: u32, fee_basis: FeeBasis) -> Self {
        self.fee_bps = fee_bps;
        self.fee_basis = fee_basis;
        self
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, RoundError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| RoundError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, RoundError> {
        let config: Self = toml::from_str(s).map_err(|e| RoundError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RoundError> {
        let max = BPS_DENOMINATOR as u32;
        if self.fee_bps > max {
            return Err(RoundError::Config(format!(
                "fee_bps {} exceeds {max}",
                self.fee_bps
            )));
        }
        if self.max_slippage_bps > max {
            return Err(RoundError::Config(format!(
                "max_slippage_bps {} exceeds {max}",
                self.max_slippage_bps
            )));
        }
        if self.owner == self.account {
            return Err(RoundError::Config(
                "owner and custody account must differ".to_string(),
            ));
        }
        Ok(())
    }
}
