//! Fundamental types for votepool.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account and asset identifiers, amount arithmetic helpers, and timestamps.

pub mod address;
pub mod amount;
pub mod asset;
pub mod error;
pub mod time;

pub use address::AccountId;
pub use amount::{apply_bps, mul_div_floor, BPS_DENOMINATOR};
pub use asset::{Asset, AssetId};
pub use error::TypeError;
pub use time::Timestamp;
