//! Cookie jar helper for CI secrets
//!
//! # Usage
//!
//! ```bash
//! baha-cookies encode --input cookies.txt
//! COOKIES_BASE64=... baha-cookies decode --output cookies.txt
//! ```

use baha_blacklist::{
    cli::{
        Verbosity,
        cookies::{run_decode, run_encode},
        init_logging,
    },
    utils::base64::COOKIES_ENV_VAR,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Encode or decode a Netscape cookie file as base64
#[derive(Parser, Debug)]
#[command(name = "baha-cookies", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Print a cookie file as base64
    Encode {
        /// Cookie file to encode
        #[arg(short, long, default_value = "cookies.txt")]
        input: PathBuf,

        /// Also write the encoded text to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the cookie file held in an environment variable
    Decode {
        /// Variable holding the encoded cookies
        #[arg(long, default_value = COOKIES_ENV_VAR)]
        var: String,

        /// Destination cookie file
        #[arg(short, long, default_value = "cookies.txt")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(!cli.verbose, cli.verbose));

    match cli.command {
        Command::Encode { input, output } => run_encode(&input, output.as_deref()),
        Command::Decode { var, output } => run_decode(&var, &output),
    }
}
