//! Reward-per-token accrual, replayed off-chain.

use crate::{
    utils::{mul_div_floor, U256},
    SCALE,
};

/// The accumulator bookkeeping of the staking program.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccrualCurve;

impl AccrualCurve {
    /// Advance the scaled accumulator by `elapsed` seconds of emission.
    ///
    /// acc' = acc + floor(rate * elapsed * SCALE / total_staked)
    ///
    /// Floor division matches the ledger, so the projection never runs ahead of
    /// what will actually be paid. An empty pool does not accrue.
    pub fn project_accumulator(
        acc_scaled: u128,
        rate_per_sec: u64,
        elapsed: u64,
        total_staked: u64,
    ) -> U256 {
        let acc = U256::from(acc_scaled);
        if total_staked == 0 {
            return acc;
        }
        // u64 * u64 always fits in 256 bits
        let emitted = U256::from(rate_per_sec) * U256::from(elapsed);
        let growth = mul_div_floor(emitted, U256::from(SCALE), U256::from(total_staked));
        acc.saturating_add(growth)
    }

    /// Reward value of `staked` units at accumulator `acc_scaled`, floored.
    pub fn earned(staked: u64, acc_scaled: U256) -> U256 {
        mul_div_floor(U256::from(staked), acc_scaled, U256::from(SCALE))
    }

    /// Carry plus whatever was earned past the debt checkpoint.
    ///
    /// A stale pair can leave `earned` below `debt`; the carry alone is owed then.
    pub fn pending(earned: U256, debt: u128, unpaid_rewards: u64) -> U256 {
        let debt = U256::from(debt);
        let unpaid = U256::from(unpaid_rewards);
        if earned > debt {
            unpaid.saturating_add(earned - debt)
        } else {
            unpaid
        }
    }
}
