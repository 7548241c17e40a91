//! Base64 helpers for storing cookie jars in CI secrets
//!
//! A cookie file is encoded once on the desktop, pasted into a secret, and
//! decoded back into a file by the CI job before it logs in.

use crate::{Error, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use std::path::Path;

/// Environment variable the CI job reads the encoded jar from
pub const COOKIES_ENV_VAR: &str = "COOKIES_BASE64";

/// Encode UTF-8 text
pub fn encode_base64(data: &str) -> String {
    STANDARD.encode(data.as_bytes())
}

/// Decode to UTF-8 text; surrounding whitespace and line breaks are ignored
pub fn decode_base64(encoded: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}

/// Encode a cookie file, optionally writing the result to `output`
pub fn cookies_to_base64(input: &Path, output: Option<&Path>) -> Result<String> {
    let content = std::fs::read_to_string(input)
        .map_err(|e| Error::cookie_file(input.display().to_string(), e.to_string()))?;
    let encoded = encode_base64(&content);

    if let Some(output) = output {
        std::fs::write(output, &encoded)?;
        tracing::info!("Encoded cookies written to {}", output.display());
    }
    Ok(encoded)
}

/// Decode an encoded jar into `dest`
pub fn decode_cookies_to_file(encoded: &str, dest: &Path) -> Result<()> {
    let content = decode_base64(encoded)?;
    std::fs::write(dest, content)?;
    tracing::debug!("Decoded cookies written to {}", dest.display());
    Ok(())
}

/// Decode the jar held in environment variable `var` into `dest`
pub fn decode_cookies_from_env(var: &str, dest: &Path) -> Result<()> {
    let encoded = std::env::var(var).unwrap_or_default();
    if encoded.trim().is_empty() {
        return Err(Error::config(format!("{} is not set or empty", var)));
    }
    decode_cookies_to_file(&encoded, dest)
}
