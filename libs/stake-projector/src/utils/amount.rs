//! Base unit <-> human amount conversions.
//!
//! Done on decimal strings so no floating point ever touches a balance.

use crate::error::ErrorCode;

/// Render `amount` base units with `decimals` mint decimals, keeping
/// `display_decimals` fractional digits. Extra digits are dropped, not rounded,
/// so a displayed balance never exceeds what the ledger holds.
pub fn format_base_units(amount: u128, decimals: u8, display_decimals: u8) -> String {
    let decimals = decimals as usize;
    let display_decimals = display_decimals as usize;

    let mut digits = amount.to_string();
    if digits.len() <= decimals {
        digits = format!("{:0>width$}", digits, width = decimals + 1);
    }
    let (whole, frac) = digits.split_at(digits.len() - decimals);

    if display_decimals == 0 {
        return whole.to_string();
    }
    let mut frac: String = frac.chars().take(display_decimals).collect();
    while frac.len() < display_decimals {
        frac.push('0');
    }
    format!("{}.{}", whole, frac)
}

/// Parse a human amount such as `"12.5"` into base units for a mint with
/// `decimals` decimals.
pub fn parse_ui_amount(input: &str, decimals: u8) -> Result<u128, ErrorCode> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ErrorCode::EmptyAmount);
    }

    let (whole, frac) = input.split_once('.').unwrap_or((input, ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(ErrorCode::InvalidAmount(input.to_string()));
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return Err(ErrorCode::InvalidAmount(input.to_string()));
    }
    if frac.len() > decimals as usize {
        return Err(ErrorCode::TooManyDecimals {
            given: frac.len(),
            decimals,
        });
    }

    let padding = decimals as usize - frac.len();
    whole
        .chars()
        .chain(frac.chars())
        .chain(std::iter::repeat('0').take(padding))
        .try_fold(0u128, |acc, c| {
            acc.checked_mul(10)?
                .checked_add(u128::from(c.to_digit(10)?))
        })
        .ok_or(ErrorCode::Overflow)
}

/// Percent with two fractional digits, as shown on the dashboard cards.
pub fn format_percent(percent: f64) -> String {
    format!("{:.2}%", percent)
}
