use crate::{error::ErrorCode, states::UserSnapshot};

//
// ──────────────────────────────────────────────────────────────────────────────
// PoolSnapshot
// ──────────────────────────────────────────────────────────────────────────────
//

/// Point-in-time copy of the shared pool ledger.
///
/// Produced by whoever reads the chain and handed to the calculator by value.
/// The accrual math works in base units only; the two decimals fields exist
/// for display conversions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize))]
pub struct PoolSnapshot {
    /// Sum of every user's staked balance, in staking token base units.
    pub total_staked: u64,

    /// Cumulative reward per staked unit, scaled by `SCALE`,
    /// as of `last_update_ts`.
    pub acc_scaled: u128,

    /// UNIX timestamp (seconds) of the last on-chain accumulator update.
    pub last_update_ts: i64,

    /// Reward token base units emitted per second across the whole pool.
    pub rate_per_sec: u64,

    pub reward_mint_decimals: u8,
    pub staking_mint_decimals: u8,

    /// `false` until the admin has attached a reward mint to the pool.
    pub reward_configured: bool,
}

impl PoolSnapshot {
    /// True when the accumulator can grow: rewards are configured, something
    /// is emitted, and someone is staked to receive it.
    pub fn is_accruing(&self) -> bool {
        self.reward_configured && self.rate_per_sec > 0 && self.total_staked > 0
    }

    /// Seconds since the last on-chain update, never negative.
    pub fn elapsed_since_update(&self, now: i64) -> u64 {
        now.saturating_sub(self.last_update_ts).max(0) as u64
    }

    /// Reports a user record that cannot belong to this pool snapshot.
    ///
    /// Only ever a sign of snapshots read at different times; the calculator
    /// tolerates the pair either way.
    pub fn check_user(&self, user: &UserSnapshot) -> Result<(), ErrorCode> {
        if user.staked > self.total_staked {
            return Err(ErrorCode::StakeExceedsPool {
                staked: user.staked,
                total_staked: self.total_staked,
            });
        }
        Ok(())
    }
}
