use super::utils::deserialize_anchor_account;
use anchor_lang::prelude::*;
use stake_projector::{PoolSnapshot, UserSnapshot};

//
// ──────────────────────────────────────────────────────────────────────────────
// Pool Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// Shared ledger record of one staking pool, as laid out by the program.
#[account]
#[derive(Debug, Default, PartialEq)]
pub struct Pool {
    /// Admin allowed to configure rewards.
    pub admin: Pubkey,
    pub staking_mint: Pubkey,
    /// Default key until the admin attaches a reward mint.
    pub reward_mint: Pubkey,
    pub staking_vault: Pubkey,
    pub reward_vault: Pubkey,
    /// Total staked across all users (staking base units).
    pub total_staked: u64,
    /// Reward-per-token accumulator scaled by `SCALE`.
    pub acc_scaled: u128,
    /// UNIX timestamp (seconds) of the last accumulator update.
    pub last_update_ts: i64,
    /// Reward base units emitted per second.
    pub rate_per_sec: u64,
    pub bump: u8,
    pub signer_bump: u8,
}

impl Pool {
    pub fn from_account(account: &solana_sdk::account::Account) -> anyhow::Result<Self> {
        deserialize_anchor_account::<Pool>(account)
    }

    pub fn reward_configured(&self) -> bool {
        self.reward_mint != Pubkey::default()
    }

    pub fn to_snapshot(&self, staking_mint_decimals: u8, reward_mint_decimals: u8) -> PoolSnapshot {
        PoolSnapshot {
            total_staked: self.total_staked,
            acc_scaled: self.acc_scaled,
            last_update_ts: self.last_update_ts,
            rate_per_sec: self.rate_per_sec,
            reward_mint_decimals,
            staking_mint_decimals,
            reward_configured: self.reward_configured(),
        }
    }
}

//
// ──────────────────────────────────────────────────────────────────────────────
// User Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// Per-staker ledger record.
#[account]
#[derive(Debug, Default, PartialEq)]
pub struct User {
    pub owner: Pubkey,
    /// Staked amount (staking base units).
    pub staked: u64,
    /// Reward already accounted for at the last stake/unstake/claim.
    pub debt: u128,
    /// Credited but not yet transferred.
    pub unpaid_rewards: u64,
}

/// `User` body written before `unpaid_rewards` existed. Same discriminator.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq)]
pub struct LegacyUser {
    pub owner: Pubkey,
    pub staked: u64,
    pub debt: u128,
}

impl From<LegacyUser> for User {
    fn from(legacy: LegacyUser) -> Self {
        Self {
            owner: legacy.owner,
            staked: legacy.staked,
            debt: legacy.debt,
            unpaid_rewards: 0,
        }
    }
}

impl User {
    /// Decodes either layout; the older one reads with `unpaid_rewards = 0`.
    pub fn from_account(account: &solana_sdk::account::Account) -> anyhow::Result<Self> {
        match deserialize_anchor_account::<User>(account) {
            Ok(user) => Ok(user),
            Err(e) if account.data.starts_with(User::DISCRIMINATOR) => {
                let mut body: &[u8] = &account.data[User::DISCRIMINATOR.len()..];
                let legacy = LegacyUser::deserialize(&mut body).map_err(|_| e)?;
                Ok(legacy.into())
            }
            Err(e) => Err(e),
        }
    }

    pub fn to_snapshot(&self) -> UserSnapshot {
        UserSnapshot::new(self.staked, self.debt, self.unpaid_rewards)
    }
}
