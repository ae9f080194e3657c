#![allow(dead_code)]
use anchor_lang::declare_id;
use anyhow::{format_err, Result};
use clap::Parser;
use configparser::ini::Ini;
use solana_client::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;
use stake_projector::{
    utils::{format_base_units, format_percent, parse_ui_amount},
    PoolSnapshot, RewardCalculator,
};
use std::str::FromStr;
use std::thread;
use std::time::Duration;

mod display;
mod ledger;
use ledger::rpc::*;
use ledger::utils::unix_timestamp;

// Owner of the `#[account]` layouts in `ledger::accounts`. Reads are checked
// against the configured `program_id`.
declare_id!("8eY8x8TAAHkFsN9w42Z85PqBr5kkJRGTyQKQA1qP2WvJ");

pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    http_url: String,
    program_id: Pubkey,
    pool_address: Pubkey,
    user_address: Option<Pubkey>,
    refresh_interval_secs: u64,
}

fn required(config: &Ini, key: &str) -> Result<String> {
    let value = config
        .get("Global", key)
        .ok_or_else(|| format_err!("{} is missing from [Global]", key))?;
    if value.is_empty() {
        return Err(format_err!("{} must not be empty", key));
    }
    Ok(value)
}

fn parse_pubkey(key: &str, value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value).map_err(|e| format_err!("{} is not a valid address: {}", key, e))
}

fn parse_cfg(config: &Ini) -> Result<ClientConfig> {
    let http_url = required(config, "http_url")?;
    let program_id = parse_pubkey("program_id", &required(config, "program_id")?)?;
    let pool_address = parse_pubkey("pool_address", &required(config, "pool_address")?)?;
    let user_address = match config.get("Global", "user_address") {
        Some(value) if !value.is_empty() => Some(parse_pubkey("user_address", &value)?),
        _ => None,
    };
    let refresh_interval_secs = config
        .getuint("Global", "refresh_interval_secs")
        .map_err(|e| format_err!("refresh_interval_secs: {}", e))?
        .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS)
        .max(1);

    Ok(ClientConfig {
        http_url,
        program_id,
        pool_address,
        user_address,
        refresh_interval_secs,
    })
}

fn load_cfg(client_config: &str) -> Result<ClientConfig> {
    let mut config = Ini::new();
    config
        .load(client_config)
        .map_err(|e| format_err!("failed to read {}: {}", client_config, e))?;
    parse_cfg(&config)
}

/// Connection and selection state for one run, handed to each command.
pub struct Session {
    config: ClientConfig,
    rpc_client: RpcClient,
}

impl Session {
    fn new(config: ClientConfig) -> Self {
        let rpc_client = RpcClient::new(config.http_url.to_string());
        Self { config, rpc_client }
    }

    /// A flag wins over the configured user.
    fn user_address(&self, user: Option<Pubkey>) -> Option<Pubkey> {
        user.or(self.config.user_address)
    }

    fn load_view(&self, user: Option<&Pubkey>) -> Result<LedgerView> {
        let view = load_ledger_view(
            &self.rpc_client,
            &self.config.program_id,
            &self.config.pool_address,
            user,
        )?;
        if let Some(user) = &view.user {
            if let Err(e) = view.pool.check_user(user) {
                display::warn(&format!("stale snapshot pair: {}", e));
            }
        }
        if !view.pool.reward_configured {
            display::warn("reward configuration not set for this pool");
        }
        Ok(view)
    }
}

#[derive(Debug, Parser)]
pub struct Opts {
    #[arg(long, default_value = "client_config.ini")]
    pub config: String,
    #[clap(subcommand)]
    pub command: ProjectorCommands,
}

#[derive(Debug, Parser)]
pub enum ProjectorCommands {
    /// Show the pool ledger and its annualized yield.
    Pool {},
    /// Project the pending reward once, at the current wall clock.
    Pending {
        #[arg(long)]
        user: Option<Pubkey>,
    },
    /// Re-project every second, re-reading the ledger periodically.
    Watch {
        #[arg(long)]
        user: Option<Pubkey>,
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Yield breakdown in display units of both mints.
    Apy {
        #[arg(long)]
        json: bool,
    },
    /// Convert a human per-second rate to base units and preview its yield.
    PreviewRate {
        /// Reward tokens per second, e.g. `0.5`.
        rate: String,
        #[arg(long)]
        decimals: Option<u8>,
    },
    /// Reward vault token balance.
    VaultBalance {},
}

fn watch(session: &Session, user: Option<Pubkey>, ticks: Option<u64>) -> Result<()> {
    let mut view = session.load_view(user.as_ref())?;
    let mut since_refresh = 0u64;
    let mut tick = 0u64;
    while ticks.map_or(true, |limit| tick < limit) {
        if since_refresh >= session.config.refresh_interval_secs {
            // keep projecting from the last good snapshot if the read fails
            match session.load_view(user.as_ref()) {
                Ok(fresh) => view = fresh,
                Err(e) => display::warn(&format!("ledger refresh failed: {}", e)),
            }
            since_refresh = 0;
        }
        let now = unix_timestamp()?;
        let projection = RewardCalculator::project(&view.pool, view.user.as_ref(), now);
        display::print_projection(&view, now, &projection);

        tick += 1;
        since_refresh += 1;
        thread::sleep(Duration::from_secs(1));
    }
    Ok(())
}

/// Pool as it would look with `rate_per_sec` configured.
fn with_rate(pool: &PoolSnapshot, rate_per_sec: u64, reward_decimals: u8) -> PoolSnapshot {
    PoolSnapshot {
        rate_per_sec,
        reward_mint_decimals: reward_decimals,
        reward_configured: true,
        ..*pool
    }
}

fn preview_rate(session: &Session, rate: &str, decimals: Option<u8>) -> Result<()> {
    let view = session.load_view(None)?;
    let reward_decimals = match decimals {
        Some(decimals) => decimals,
        None if view.pool.reward_configured => view.pool.reward_mint_decimals,
        None => {
            return Err(format_err!(
                "reward mint not configured, pass --decimals for the intended reward mint"
            ))
        }
    };
    let rate_base = parse_ui_amount(rate, reward_decimals)?;
    let rate_base = u64::try_from(rate_base)
        .map_err(|_| format_err!("rate {} does not fit in u64 base units", rate_base))?;
    if rate_base == 0 {
        display::warn("rate scales to 0 base units; yield will stay at 0");
    }

    let pool = with_rate(&view.pool, rate_base, reward_decimals);
    println!("base units/sec: {}", rate_base);
    println!(
        "annualized yield: {}",
        format_percent(RewardCalculator::compute_annualized_yield(&pool))
    );
    if let Some(breakdown) = RewardCalculator::yield_breakdown(&pool) {
        display::print_breakdown(&breakdown);
    }
    Ok(())
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    let session = Session::new(load_cfg(&opts.config)?);

    match opts.command {
        ProjectorCommands::Pool {} => {
            let view = session.load_view(None)?;
            let annualized_yield = RewardCalculator::compute_annualized_yield(&view.pool);
            display::print_pool(&view, annualized_yield);
        }
        ProjectorCommands::Pending { user } => {
            let user = session.user_address(user);
            let view = session.load_view(user.as_ref())?;
            if let (Some(address), None) = (view.user_address, view.user) {
                display::warn(&format!("user account {} not found; nothing staked yet", address));
            }
            let now = unix_timestamp()?;
            let projection = RewardCalculator::project(&view.pool, view.user.as_ref(), now);
            println!(
                "{}",
                format_base_units(
                    projection.pending,
                    view.pool.reward_mint_decimals,
                    view.pool.reward_mint_decimals
                )
            );
        }
        ProjectorCommands::Watch { user, ticks } => {
            let user = session.user_address(user);
            watch(&session, user, ticks)?;
        }
        ProjectorCommands::Apy { json } => {
            let view = session.load_view(None)?;
            match RewardCalculator::yield_breakdown(&view.pool) {
                Some(breakdown) if json => println!("{}", serde_json::to_string_pretty(&breakdown)?),
                Some(breakdown) => display::print_breakdown(&breakdown),
                None => display::warn("pool does not accrue: no stake, no rate, or no reward mint"),
            }
        }
        ProjectorCommands::PreviewRate { rate, decimals } => {
            preview_rate(&session, &rate, decimals)?;
        }
        ProjectorCommands::VaultBalance {} => {
            let view = session.load_view(None)?;
            if !view.pool.reward_configured {
                return Err(format_err!("reward configuration not set for this pool"));
            }
            let balance = fetch_vault_balance(&session.rpc_client, &view.pool_account.reward_vault)?;
            display::print_vault_balance(&balance);
        }
    }
    Ok(())
}
