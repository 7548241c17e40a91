//! Blacklist run orchestration

pub mod mode;
pub mod runner;

pub use mode::Mode;
pub use runner::{BlacklistSite, RunSummary, run};
