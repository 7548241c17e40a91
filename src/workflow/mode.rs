//! Run modes of the blacklist tool

use serde::{Deserialize, Serialize};
use std::fmt;

/// Step of a blacklist run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Add the shared block list to the account
    Update,
    /// Write the account's block list to a file
    Export,
    /// Remove inactive accounts from the block list
    Clean,
}

impl Mode {
    /// Every mode, in execution order
    pub const ALL: [Mode; 3] = [Mode::Update, Mode::Export, Mode::Clean];
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Update => "update",
            Self::Export => "export",
            Self::Clean => "clean",
        })
    }
}
