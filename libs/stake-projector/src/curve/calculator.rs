//! Pending reward and yield calculations

use crate::{
    curve::accrual::AccrualCurve,
    states::{PoolSnapshot, UserSnapshot},
    utils::{mul_div_floor, SaturatingNarrow, U256},
    SECONDS_PER_YEAR, YIELD_PRECISION,
};

/// Output of one render tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "client", derive(serde::Serialize))]
pub struct Projection {
    /// Reward owed to the user right now, in reward token base units.
    pub pending: u128,
    /// Annualized yield in percent.
    pub annualized_yield: f64,
}

/// Yield expressed in display units of both mints.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "client", derive(serde::Serialize))]
pub struct YieldBreakdown {
    pub rate_per_sec_ui: f64,
    pub total_staked_ui: f64,
    pub yearly_rewards_ui: f64,
    pub seconds_per_year: u64,
    /// Yield in percent after adjusting for the decimals of both mints.
    pub apy_percent: f64,
    pub reward_decimals: u8,
    pub staking_decimals: u8,
}

/// Stateless entry point for the dashboard. Every call is independent of the
/// previous one, so it can run on each tick from any number of observers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RewardCalculator {}

impl RewardCalculator {
    /// Reward owed to `user` at wall clock `now`, in reward base units.
    ///
    /// Degenerate inputs degrade to a number, never to an error:
    /// - an empty pool owes nothing;
    /// - `now` before the last update counts as zero elapsed time;
    /// - debt ahead of earnings falls back to the unpaid carry.
    pub fn compute_pending_reward(pool: &PoolSnapshot, user: &UserSnapshot, now: i64) -> u128 {
        if pool.total_staked == 0 {
            return 0;
        }
        let elapsed = if pool.reward_configured {
            pool.elapsed_since_update(now)
        } else {
            0
        };

        let acc_projected = AccrualCurve::project_accumulator(
            pool.acc_scaled,
            pool.rate_per_sec,
            elapsed,
            pool.total_staked,
        );
        let earned = AccrualCurve::earned(user.staked, acc_projected);
        AccrualCurve::pending(earned, user.debt, user.unpaid_rewards).saturating_as_u128()
    }

    /// Yearly emission over total stake, in percent, on base units:
    /// `rate_per_sec * SECONDS_PER_YEAR / total_staked * 100`.
    ///
    /// Zero for an empty pool, a zero rate, or a pool without rewards. No upper
    /// bound: a tiny stake against a real rate legitimately shows huge numbers.
    pub fn compute_annualized_yield(pool: &PoolSnapshot) -> f64 {
        if !pool.is_accruing() {
            return 0.0;
        }
        let yearly_percent =
            U256::from(pool.rate_per_sec) * U256::from(SECONDS_PER_YEAR) * U256::from(100u64);
        let scaled = mul_div_floor(
            yearly_percent,
            U256::from(YIELD_PRECISION),
            U256::from(pool.total_staked),
        );
        scaled_to_f64(scaled, YIELD_PRECISION)
    }

    /// Both quantities for one tick. `user` is `None` for a wallet that has
    /// never staked in this pool.
    pub fn project(pool: &PoolSnapshot, user: Option<&UserSnapshot>, now: i64) -> Projection {
        Projection {
            pending: user
                .map(|user| Self::compute_pending_reward(pool, user, now))
                .unwrap_or(0),
            annualized_yield: Self::compute_annualized_yield(pool),
        }
    }

    /// Yield in UI units of both mints. `None` for a pool that does not accrue.
    pub fn yield_breakdown(pool: &PoolSnapshot) -> Option<YieldBreakdown> {
        if !pool.is_accruing() {
            return None;
        }
        let reward_unit = 10f64.powi(pool.reward_mint_decimals as i32);
        let staking_unit = 10f64.powi(pool.staking_mint_decimals as i32);
        let rate_per_sec_ui = pool.rate_per_sec as f64 / reward_unit;
        let total_staked_ui = pool.total_staked as f64 / staking_unit;

        let decimals_shift =
            pool.staking_mint_decimals as i32 - pool.reward_mint_decimals as i32;
        let apy_percent = Self::compute_annualized_yield(pool) * 10f64.powi(decimals_shift);

        Some(YieldBreakdown {
            rate_per_sec_ui,
            total_staked_ui,
            yearly_rewards_ui: rate_per_sec_ui * SECONDS_PER_YEAR as f64,
            seconds_per_year: SECONDS_PER_YEAR,
            apy_percent,
            reward_decimals: pool.reward_mint_decimals,
            staking_decimals: pool.staking_mint_decimals,
        })
    }
}

/// Fixed-point `scaled / precision` to a float without going through a lossy
/// float division of the whole value.
fn scaled_to_f64(scaled: U256, precision: u128) -> f64 {
    let precision_wide = U256::from(precision);
    let whole = (scaled / precision_wide).saturating_as_u128();
    let frac = (scaled % precision_wide).saturating_as_u128();
    whole as f64 + frac as f64 / precision as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SCALE;
    use proptest::prelude::*;

    fn pool(total_staked: u64, acc_scaled: u128, last_update_ts: i64, rate_per_sec: u64) -> PoolSnapshot {
        PoolSnapshot {
            total_staked,
            acc_scaled,
            last_update_ts,
            rate_per_sec,
            reward_mint_decimals: 6,
            staking_mint_decimals: 6,
            reward_configured: true,
        }
    }

    fn base_pool() -> PoolSnapshot {
        pool(1_000_000, 0, 1_000, 10)
    }

    #[test]
    fn test_half_stake_ten_seconds() {
        let user = UserSnapshot::new(500_000, 0, 0);
        assert_eq!(RewardCalculator::compute_pending_reward(&base_pool(), &user, 1_010), 50);
    }

    #[test]
    fn test_debt_is_subtracted() {
        let user = UserSnapshot::new(500_000, 30, 0);
        assert_eq!(RewardCalculator::compute_pending_reward(&base_pool(), &user, 1_010), 20);
    }

    #[test]
    fn test_empty_pool_owes_nothing() {
        let empty = pool(0, 5 * SCALE, 1_000, 10);
        for user in [
            UserSnapshot::new(0, 0, 0),
            UserSnapshot::new(500_000, 0, 99),
            UserSnapshot::new(u64::MAX, u128::MAX, u64::MAX),
        ] {
            for now in [i64::MIN, 0, 1_000, 1_010, i64::MAX] {
                assert_eq!(RewardCalculator::compute_pending_reward(&empty, &user, now), 0);
            }
        }
    }

    #[test]
    fn test_zero_rate_has_zero_yield() {
        let p = pool(1_000, 0, 0, 0);
        assert_eq!(RewardCalculator::compute_annualized_yield(&p), 0.0);
    }

    #[test]
    fn test_empty_pool_has_zero_yield() {
        let p = pool(0, 0, 0, 10);
        assert_eq!(RewardCalculator::compute_annualized_yield(&p), 0.0);
    }

    #[test]
    fn test_annualized_yield() {
        // 10 * 31_536_000 / 1_000_000 * 100
        assert_eq!(RewardCalculator::compute_annualized_yield(&base_pool()), 31_536.0);

        let p = pool(7, 0, 0, 1);
        let expected = 3_153_600_000.0 / 7.0;
        assert!((RewardCalculator::compute_annualized_yield(&p) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_annualized_yield_tiny_rate_is_not_zero() {
        let p = pool(u64::MAX, 0, 0, 1);
        let y = RewardCalculator::compute_annualized_yield(&p);
        assert!(y > 0.0);
        assert!((y - 3_153_600_000.0 / u64::MAX as f64).abs() < 1e-11);
    }

    #[test]
    fn test_annualized_yield_huge_rate_tiny_stake() {
        let p = pool(1, 0, 0, u64::MAX);
        let y = RewardCalculator::compute_annualized_yield(&p);
        let expected = u64::MAX as f64 * 3_153_600_000.0;
        assert!(y.is_finite());
        assert!(((y - expected) / expected).abs() < 1e-12);
    }

    #[test]
    fn test_stale_debt_falls_back_to_unpaid() {
        let user = UserSnapshot::new(500_000, 1_000, 12);
        assert_eq!(RewardCalculator::compute_pending_reward(&base_pool(), &user, 1_010), 12);
    }

    #[test]
    fn test_unpaid_carry_is_added() {
        let user = UserSnapshot::new(500_000, 30, 5);
        assert_eq!(RewardCalculator::compute_pending_reward(&base_pool(), &user, 1_010), 25);
    }

    #[test]
    fn test_clock_behind_ledger() {
        let user = UserSnapshot::new(500_000, 0, 0);
        let p = pool(1_000_000, 200_000_000, 1_000, 10);
        let at_update = RewardCalculator::compute_pending_reward(&p, &user, 1_000);
        assert_eq!(at_update, 100);
        assert_eq!(RewardCalculator::compute_pending_reward(&p, &user, 500), at_update);
    }

    #[test]
    fn test_unconfigured_reward_does_not_accrue() {
        let mut p = base_pool();
        p.reward_configured = false;
        let user = UserSnapshot::new(500_000, 0, 3);
        assert_eq!(RewardCalculator::compute_pending_reward(&p, &user, 1_010), 3);
        assert_eq!(RewardCalculator::compute_annualized_yield(&p), 0.0);
        assert!(RewardCalculator::yield_breakdown(&p).is_none());
    }

    #[test]
    fn test_saturates_instead_of_overflowing() {
        let p = pool(u64::MAX, u128::MAX, 0, u64::MAX);
        let user = UserSnapshot::new(u64::MAX, 0, u64::MAX);
        assert_eq!(RewardCalculator::compute_pending_reward(&p, &user, i64::MAX), u128::MAX);
    }

    #[test]
    fn test_project_without_user() {
        let projection = RewardCalculator::project(&base_pool(), None, 1_010);
        assert_eq!(projection.pending, 0);
        assert_eq!(projection.annualized_yield, 31_536.0);

        let user = UserSnapshot::new(500_000, 0, 0);
        let projection = RewardCalculator::project(&base_pool(), Some(&user), 1_010);
        assert_eq!(projection.pending, 50);
    }

    #[test]
    fn test_yield_breakdown_adjusts_decimals() {
        // 1 reward token (6 dp) per second against 1_000 staked tokens (9 dp)
        let mut p = pool(1_000_000_000_000, 0, 0, 1_000_000);
        p.staking_mint_decimals = 9;
        let breakdown = RewardCalculator::yield_breakdown(&p).unwrap();
        assert_eq!(breakdown.rate_per_sec_ui, 1.0);
        assert_eq!(breakdown.total_staked_ui, 1_000.0);
        assert_eq!(breakdown.yearly_rewards_ui, 31_536_000.0);
        assert_eq!(breakdown.seconds_per_year, SECONDS_PER_YEAR);
        assert!((breakdown.apy_percent - 3_153_600.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn pending_never_decreases_with_time(
            total in 1u64..=u64::MAX,
            share in any::<u64>(),
            acc in 0u128..=(u64::MAX as u128) * SCALE,
            rate in 1u64..=u64::MAX,
            last in -1_000_000_000i64..2_000_000_000,
            dt in 0i64..1_000_000_000,
            step in 0i64..1_000_000_000,
            debt in any::<u128>(),
            unpaid in any::<u64>()
        ) {
            let staked = ((total as u128 * share as u128) / u64::MAX as u128) as u64;
            let p = pool(total, acc, last, rate);
            let user = UserSnapshot::new(staked, debt, unpaid);
            let earlier = RewardCalculator::compute_pending_reward(&p, &user, last + dt);
            let later = RewardCalculator::compute_pending_reward(&p, &user, last + dt + step);
            prop_assert!(later >= earlier);
        }

        #[test]
        fn past_clock_equals_update_time(
            total in 1u64..=u64::MAX,
            acc in any::<u128>(),
            rate in any::<u64>(),
            last in -1_000_000_000i64..2_000_000_000,
            behind in 1i64..1_000_000_000,
            staked in any::<u64>(),
            debt in any::<u128>(),
            unpaid in any::<u64>()
        ) {
            let p = pool(total, acc, last, rate);
            let user = UserSnapshot::new(staked.min(total), debt, unpaid);
            prop_assert_eq!(
                RewardCalculator::compute_pending_reward(&p, &user, last - behind),
                RewardCalculator::compute_pending_reward(&p, &user, last)
            );
        }

        #[test]
        fn empty_pool_always_zero(
            acc in any::<u128>(),
            rate in any::<u64>(),
            last in any::<i64>(),
            now in any::<i64>(),
            staked in any::<u64>(),
            debt in any::<u128>(),
            unpaid in any::<u64>()
        ) {
            let p = pool(0, acc, last, rate);
            let user = UserSnapshot::new(staked, debt, unpaid);
            prop_assert_eq!(RewardCalculator::compute_pending_reward(&p, &user, now), 0);
        }

        #[test]
        fn pending_at_least_unpaid(
            total in 1u64..=u64::MAX,
            acc in any::<u128>(),
            rate in any::<u64>(),
            last in any::<i64>(),
            now in any::<i64>(),
            staked in any::<u64>(),
            debt in any::<u128>(),
            unpaid in any::<u64>()
        ) {
            let p = pool(total, acc, last, rate);
            let user = UserSnapshot::new(staked.min(total), debt, unpaid);
            prop_assert!(RewardCalculator::compute_pending_reward(&p, &user, now) >= unpaid as u128);
        }

        #[test]
        fn yield_is_finite_and_non_negative(
            total in any::<u64>(),
            rate in any::<u64>()
        ) {
            let y = RewardCalculator::compute_annualized_yield(&pool(total, 0, 0, rate));
            prop_assert!(y.is_finite());
            prop_assert!(y >= 0.0);
            if total == 0 || rate == 0 {
                prop_assert_eq!(y, 0.0);
            } else {
                prop_assert!(y > 0.0);
            }
        }
    }
}
