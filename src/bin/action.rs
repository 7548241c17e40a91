//! CI export job
//!
//! Restores the cookie jar from the `COOKIES_BASE64` secret, logs in with it
//! and writes the account's block list to the configured destination.
//! The account comes from `BAHA_ACCOUNT` (or the older `BAHA_USERNAME`).
//!
//! # Usage
//!
//! ```bash
//! BAHA_ACCOUNT=my_account COOKIES_BASE64=... baha-blacklist-action
//! ```

use baha_blacklist::{
    cli::{ActionArgs, Verbosity, run_action_mode},
    utils::base64::COOKIES_ENV_VAR,
};
use clap::Parser;
use std::path::PathBuf;

/// Export a block list with cookies restored from a CI secret
#[derive(Parser, Debug)]
#[command(name = "baha-blacklist-action", author, version, about, long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Environment variable holding the base64 cookie jar
    #[arg(long, value_name = "NAME", default_value = COOKIES_ENV_VAR)]
    cookies_var: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_action_mode(ActionArgs {
        config: cli.config,
        cookies_var: cli.cookies_var,
        verbosity: Verbosity::from_flags(false, cli.verbose),
    })
    .await
}
