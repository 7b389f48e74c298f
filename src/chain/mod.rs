// src/chain/mod.rs

//! Process chains: ordered command lists with fail-fast execution.

pub mod executor;
pub mod process_chain;

pub use executor::{ChainExecutor, ChainOutcome};
pub use process_chain::ProcessChain;
