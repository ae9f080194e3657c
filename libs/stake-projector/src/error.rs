use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    #[error("Amount string is empty")]
    EmptyAmount,

    #[error("Amount is not a valid decimal number: {0}")]
    InvalidAmount(String),

    #[error("Amount has {given} fractional digits, mint supports {decimals}")]
    TooManyDecimals { given: usize, decimals: u8 },

    #[error("Arithmetic overflow occurred")]
    Overflow,

    #[error("User stake {staked} exceeds pool total {total_staked}")]
    StakeExceedsPool { staked: u64, total_staked: u64 },
}
