pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod generator;
pub mod record;
pub mod storage;
pub mod vault;

#[cfg(feature = "audit-log")]
pub mod audit;
