//
// ──────────────────────────────────────────────────────────────────────────────
// UserSnapshot
// ──────────────────────────────────────────────────────────────────────────────
//

/// Point-in-time copy of one staker's ledger record.
///
/// `debt` is the reward value (in reward base units) already accounted for at
/// the user's last stake, unstake or claim, so only accrual past that moment
/// is owed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize))]
pub struct UserSnapshot {
    /// Staking token base units deposited by this user.
    pub staked: u64,

    /// Reward already accounted for at the last ledger-mutating action.
    pub debt: u128,

    /// Reward credited by earlier actions but not yet transferred out.
    pub unpaid_rewards: u64,
}

impl UserSnapshot {
    pub fn new(staked: u64, debt: u128, unpaid_rewards: u64) -> Self {
        Self {
            staked,
            debt,
            unpaid_rewards,
        }
    }
}
