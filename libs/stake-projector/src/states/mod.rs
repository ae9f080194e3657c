pub mod pool_snapshot;
pub use pool_snapshot::*;

pub mod user_snapshot;
pub use user_snapshot::*;
