pub mod amount;
pub mod math;

pub use amount::*;
pub use math::*;
