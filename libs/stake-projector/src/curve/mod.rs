pub mod accrual;
pub mod calculator;

pub use accrual::*;
pub use calculator::*;
