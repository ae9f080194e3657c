pub mod accounts;
pub mod rpc;
pub mod utils;
