//! Cookie jar encoding for CI secrets

use crate::utils::base64::{cookies_to_base64, decode_cookies_from_env};
use anyhow::{Context, Result};
use std::path::Path;

/// Print the base64 form of a cookie file, also writing it to `output`
pub fn run_encode(input: &Path, output: Option<&Path>) -> Result<()> {
    let encoded = cookies_to_base64(input, output)
        .with_context(|| format!("failed to encode {}", input.display()))?;
    println!("{}", encoded);
    Ok(())
}

/// Decode the jar held in `var` into `output`
pub fn run_decode(var: &str, output: &Path) -> Result<()> {
    decode_cookies_from_env(var, output)
        .with_context(|| format!("failed to decode {} into {}", var, output.display()))?;
    eprintln!("Cookies written to {}", output.display());
    Ok(())
}
