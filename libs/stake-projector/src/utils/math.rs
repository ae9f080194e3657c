//! Wide unsigned integers for the accrual products.
//!
//! `rate × elapsed × SCALE` and `staked × accumulator` both leave the `u64`
//! range for realistic supplies, and the second can leave `u128` too.

#![allow(clippy::assign_op_pattern)]
#![allow(clippy::ptr_offset_with_cast)]
#![allow(clippy::manual_range_contains)]

use uint::construct_uint;

construct_uint! {
    pub struct U256(4);
}

/// Narrowing that pins to the target ceiling instead of failing.
pub trait SaturatingNarrow {
    fn saturating_as_u128(self) -> u128;
}

impl SaturatingNarrow for U256 {
    fn saturating_as_u128(self) -> u128 {
        if self > U256::from(u128::MAX) {
            u128::MAX
        } else {
            self.as_u128()
        }
    }
}

/// `floor(a * b / denominator)`, saturating at `U256::MAX` if the product
/// overflows. A zero denominator yields zero.
pub fn mul_div_floor(a: U256, b: U256, denominator: U256) -> U256 {
    if denominator.is_zero() {
        return U256::zero();
    }
    match a.checked_mul(b) {
        Some(product) => product / denominator,
        None => U256::MAX,
    }
}
