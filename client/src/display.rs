use crate::ledger::rpc::{LedgerView, VaultBalance};
use colorful::{Color, Colorful};
use stake_projector::{
    utils::{format_base_units, format_percent},
    Projection, YieldBreakdown,
};

/// Fractional digits shown for token amounts.
pub const DISPLAY_DECIMALS: u8 = 6;

fn row_label(label: &str) -> String {
    format!("{:<22}", label)
}

fn row(label: &str, value: &str) {
    println!("{}{}", row_label(label).as_str().color(Color::Cyan), value);
}

pub fn warn(message: &str) {
    eprintln!("{}", message.color(Color::Yellow));
}

pub fn print_pool(view: &LedgerView, annualized_yield: f64) {
    let pool = &view.pool;
    let account = &view.pool_account;
    row("pool", &view.pool_address.to_string());
    row("admin", &account.admin.to_string());
    row("staking mint", &account.staking_mint.to_string());
    if pool.reward_configured {
        row("reward mint", &account.reward_mint.to_string());
        row("reward vault", &account.reward_vault.to_string());
    } else {
        row("reward mint", "not configured");
    }
    row(
        "total staked",
        &format!(
            "{} ({} base units)",
            format_base_units(pool.total_staked as u128, pool.staking_mint_decimals, DISPLAY_DECIMALS),
            pool.total_staked
        ),
    );
    row("rate", &format!("{}/sec", pool.rate_per_sec));
    row("accumulator", &pool.acc_scaled.to_string());
    row("last update", &pool.last_update_ts.to_string());
    row("annualized yield", &format_percent(annualized_yield));
}

pub fn print_projection(view: &LedgerView, now: i64, projection: &Projection) {
    let pool = &view.pool;
    let pending = format_base_units(projection.pending, pool.reward_mint_decimals, DISPLAY_DECIMALS);
    match &view.user {
        Some(user) => {
            println!(
                "{} staked {} | pending {} | yield {}",
                now,
                format_base_units(user.staked as u128, pool.staking_mint_decimals, DISPLAY_DECIMALS),
                pending.as_str().color(Color::Green),
                format_percent(projection.annualized_yield)
            );
        }
        None => {
            println!(
                "{} no stake | pending {} | yield {}",
                now,
                pending,
                format_percent(projection.annualized_yield)
            );
        }
    }
}

pub fn print_breakdown(breakdown: &YieldBreakdown) {
    row("rate/sec (ui)", &breakdown.rate_per_sec_ui.to_string());
    row("total staked (ui)", &breakdown.total_staked_ui.to_string());
    row("yearly rewards (ui)", &breakdown.yearly_rewards_ui.to_string());
    row("seconds/year", &breakdown.seconds_per_year.to_string());
    row(
        "decimals",
        &format!(
            "staking {} / reward {}",
            breakdown.staking_decimals, breakdown.reward_decimals
        ),
    );
    row("apy", &format_percent(breakdown.apy_percent));
}

pub fn print_vault_balance(balance: &VaultBalance) {
    row("reward vault", &balance.address.to_string());
    let amount = format_base_units(balance.amount, balance.decimals, DISPLAY_DECIMALS);
    if balance.amount == 0 {
        row("balance", amount.as_str().color(Color::Red).to_string().as_str());
        warn("reward vault is empty, nothing can be paid out");
    } else {
        row("balance", &amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_label_pads_before_coloring() {
        assert_eq!(row_label("apy").len(), 22);
        let colored = row_label("apy").as_str().color(Color::Cyan).to_string();
        assert!(colored.contains(&format!("apy{}", " ".repeat(19))));
    }
}
