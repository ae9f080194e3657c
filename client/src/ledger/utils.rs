use anchor_lang::AccountDeserialize;
use anyhow::{format_err, Result};
use solana_sdk::account::Account;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn deserialize_anchor_account<T: AccountDeserialize>(account: &Account) -> Result<T> {
    let mut data: &[u8] = &account.data;
    T::try_deserialize(&mut data).map_err(Into::into)
}

/// Wall clock in UNIX seconds.
pub fn unix_timestamp() -> Result<i64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| format_err!("system clock before UNIX epoch: {}", e))?;
    i64::try_from(elapsed.as_secs()).map_err(|_| format_err!("system clock out of range"))
}
