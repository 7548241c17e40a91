//! Command line entry points
//!
//! The binaries parse their arguments with clap and hand them to the runners
//! here.

pub mod action;
pub mod blacklist;
pub mod cookies;
pub mod logging;

pub use action::{ActionArgs, run_action_mode};
pub use blacklist::{BlacklistArgs, run_blacklist_mode};
pub use logging::{LogLevelHandle, Verbosity, init_logging};
