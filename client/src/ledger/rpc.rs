use super::accounts::{Pool, User};
use anyhow::{format_err, Result};
use solana_client::rpc_client::RpcClient;
use solana_sdk::{account::Account, pubkey::Pubkey};
use spl_token_2022::{extension::StateWithExtensions, state::Mint};
use stake_projector::{PoolSnapshot, UserSnapshot};

/// Everything one projection needs, read at one moment.
#[derive(Clone, Debug)]
pub struct LedgerView {
    pub pool_address: Pubkey,
    pub pool_account: Pool,
    pub pool: PoolSnapshot,
    pub user_address: Option<Pubkey>,
    /// `None` when no user was requested or the user has never staked.
    pub user: Option<UserSnapshot>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VaultBalance {
    pub address: Pubkey,
    pub amount: u128,
    pub decimals: u8,
}

fn check_owner(account: &Account, program_id: &Pubkey, address: &Pubkey) -> Result<()> {
    if account.owner != *program_id {
        return Err(format_err!(
            "account {} is owned by {}, expected program {}",
            address,
            account.owner,
            program_id
        ));
    }
    Ok(())
}

pub fn fetch_pool(rpc_client: &RpcClient, program_id: &Pubkey, pool: &Pubkey) -> Result<Pool> {
    let account = rpc_client
        .get_account(pool)
        .map_err(|e| format_err!("failed to load pool {}: {}", pool, e))?;
    check_owner(&account, program_id, pool)?;
    Pool::from_account(&account)
}

/// A missing account is not an error: the wallet has simply never staked.
pub fn fetch_user(
    rpc_client: &RpcClient,
    program_id: &Pubkey,
    user: &Pubkey,
) -> Result<Option<User>> {
    let response = rpc_client.get_account_with_commitment(user, rpc_client.commitment())?;
    match response.value {
        Some(account) => {
            check_owner(&account, program_id, user)?;
            Ok(Some(User::from_account(&account)?))
        }
        None => Ok(None),
    }
}

/// Decimals of a mint owned by either token program.
pub fn mint_decimals(data: &[u8]) -> Result<u8> {
    let mint_state = StateWithExtensions::<Mint>::unpack(data)
        .map_err(|e| format_err!("failed to decode mint: {}", e))?;
    Ok(mint_state.base.decimals)
}

pub fn fetch_mint_decimals(rpc_client: &RpcClient, mint: &Pubkey) -> Result<u8> {
    let account = rpc_client
        .get_account(mint)
        .map_err(|e| format_err!("failed to load mint {}: {}", mint, e))?;
    mint_decimals(&account.data).map_err(|e| format_err!("{}: {}", mint, e))
}

pub fn fetch_vault_balance(rpc_client: &RpcClient, vault: &Pubkey) -> Result<VaultBalance> {
    let balance = rpc_client.get_token_account_balance(vault)?;
    let amount = balance
        .amount
        .parse::<u128>()
        .map_err(|e| format_err!("bad token amount {:?}: {}", balance.amount, e))?;
    Ok(VaultBalance {
        address: *vault,
        amount,
        decimals: balance.decimals,
    })
}

/// Read pool, mints and (optionally) user into snapshots.
pub fn load_ledger_view(
    rpc_client: &RpcClient,
    program_id: &Pubkey,
    pool_address: &Pubkey,
    user_address: Option<&Pubkey>,
) -> Result<LedgerView> {
    let pool_account = fetch_pool(rpc_client, program_id, pool_address)?;
    let staking_decimals = fetch_mint_decimals(rpc_client, &pool_account.staking_mint)?;
    let reward_decimals = if pool_account.reward_configured() {
        fetch_mint_decimals(rpc_client, &pool_account.reward_mint)?
    } else {
        0
    };
    let pool = pool_account.to_snapshot(staking_decimals, reward_decimals);

    let user = match user_address {
        Some(address) => fetch_user(rpc_client, program_id, address)?.map(|u| u.to_snapshot()),
        None => None,
    };

    Ok(LedgerView {
        pool_address: *pool_address,
        pool_account,
        pool,
        user_address: user_address.copied(),
        user,
    })
}
