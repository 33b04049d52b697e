//! In-memory stand-ins for the engine's collaborators.
//!
//! The round engine only sees the `Ledger` and `Exchanger` traits. The types
//! here implement them over plain maps and a fixed rate table, driven by a
//! clock that moves only when told to. Tests and the `votepool simulate`
//! command run the engine against them.

pub mod clock;
pub mod exchange;
pub mod ledger;

pub use clock::NullClock;
pub use exchange::{NullExchange, Rate};
pub use ledger::NullLedger;
