//! Block list maintenance for a gamer.com.tw account
//!
//! Adds a shared block list to the account, exports the current list and
//! removes inactive accounts once the list grows too large.
//!
//! # Usage
//!
//! ```bash
//! baha-blacklist -a my_account -p my_password
//! baha-blacklist -a my_account --cookies-first --mode export
//! baha-blacklist --config config.toml --mode clean --force-clean
//! ```

use baha_blacklist::{
    cli::{BlacklistArgs, Verbosity, run_blacklist_mode},
    config::CliOverrides,
    workflow::Mode,
};
use clap::Parser;
use std::path::PathBuf;

/// Sync and prune a gamer.com.tw block list
#[derive(Parser, Debug)]
#[command(name = "baha-blacklist", author, version, about, long_about = None)]
struct Cli {
    /// Account whose block list is maintained
    #[arg(short, long)]
    account: Option<String>,

    /// Password for password login
    #[arg(short, long)]
    password: Option<String>,

    /// Netscape cookie file used for cookie login
    #[arg(short, long, value_name = "FILE")]
    cookie_path: Option<PathBuf>,

    /// Try the cookie file before the password
    #[arg(long)]
    cookies_first: bool,

    /// URL or file of the shared block list
    #[arg(short, long, value_name = "SOURCE")]
    source_path: Option<String>,

    /// File the exported block list is written to
    #[arg(short, long, value_name = "FILE")]
    output_path: Option<PathBuf>,

    /// Modes to run
    #[arg(long, value_enum, num_args = 1.., default_values_t = Mode::ALL)]
    mode: Vec<Mode>,

    /// Clean even when the list is below the size limit
    #[arg(long)]
    force_clean: bool,

    /// Configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_args(self) -> BlacklistArgs {
        BlacklistArgs {
            config: self.config,
            overrides: CliOverrides {
                account: self.account,
                password: self.password,
                cookie_path: self.cookie_path,
                cookies_first: self.cookies_first,
                blacklist_source: self.source_path,
                blacklist_destination: self.output_path,
            },
            modes: self.mode,
            force_clean: self.force_clean,
            verbosity: Verbosity::from_flags(self.quiet, self.verbose),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_blacklist_mode(cli.into_args()).await
}
