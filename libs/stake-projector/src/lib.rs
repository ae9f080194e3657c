//! Off-chain projection of a staking pool's reward accounting.
//!
//! The on-chain program keeps a scaled reward-per-token accumulator and a
//! per-user debt checkpoint. Between ledger refreshes the dashboard replays
//! that bookkeeping locally so the pending reward counter keeps moving without
//! another RPC round trip.

/// Fixed-point scale of the pool accumulator (10^12).
pub const SCALE: u128 = 1_000_000_000_000;

/// 365-day year, no compounding.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Fractional digits kept when dividing the yearly emission by the stake.
pub const YIELD_PRECISION: u128 = 1_000_000_000_000;

pub mod curve;
pub mod error;
pub mod states;
pub mod utils;

pub use curve::*;
pub use states::*;
