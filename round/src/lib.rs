//! Pooled-funds, weighted-voting round engine.
//!
//! Participants fund competing projects during an open round; every unit of
//! base currency deposited is also a vote. At settlement the best-funded
//! project wins, the pool is converted into its asset, a platform fee goes
//! to the owner and the rest is split pro-rata among contributors. The owner
//! can instead cancel the round and let everyone be refunded.
//!
//! Lifecycle: `Idle → Open → {Closed | Refundable}`, with `reset` starting a
//! new `Open` round once no funds are outstanding.
//!
//! Balances live behind the [`votepool_ledger::Ledger`] trait and conversions
//! go through [`votepool_exchange::Exchanger`]; both are injected.

pub mod cap;
pub mod config;
pub mod contributions;
pub mod engine;
pub mod error;
pub mod event;
pub mod phase;
pub mod project;
pub mod round;
pub mod settlement;

pub use cap::CapPolicy;
pub use config::{EngineConfig, FeeBasis};
pub use contributions::Contributions;
pub use engine::VotingRound;
pub use error::RoundError;
pub use event::RoundEvent;
pub use phase::Phase;
pub use project::Project;
pub use round::{Round, RoundSnapshot};
pub use settlement::{Distribution, Payout, SettlementReport};
