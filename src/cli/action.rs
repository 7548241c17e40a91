//! CI export job
//!
//! Restores the cookie jar from a base64 secret into a scratch file, logs in
//! with it and exports the account's block list. The configured cookie file
//! is never written.

use crate::{
    api::BlacklistClient,
    cli::logging::{Verbosity, init_logging},
    config::{CliOverrides, ConfigLoader, Settings},
    utils::{base64::decode_cookies_from_env, version},
    workflow::{self, Mode},
};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Older name of `BAHA_ACCOUNT` still used by existing CI secrets
pub const LEGACY_ACCOUNT_VAR: &str = "BAHA_USERNAME";

/// Arguments for the CI job
#[derive(Debug, Clone)]
pub struct ActionArgs {
    pub config: Option<PathBuf>,
    /// Variable holding the base64 cookie jar
    pub cookies_var: String,
    pub verbosity: Verbosity,
}

/// Variable lookup that falls back to [`LEGACY_ACCOUNT_VAR`] for the account
pub fn with_legacy_account<F>(lookup: F) -> impl Fn(&str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    move |key| match key {
        "BAHA_ACCOUNT" => lookup(key).or_else(|| lookup(LEGACY_ACCOUNT_VAR)),
        _ => lookup(key),
    }
}

/// Decode the secret into a scratch jar and point the session at it
///
/// The jar is deleted when the returned handle drops.
pub fn restore_cookie_jar(var: &str, settings: &mut Settings) -> Result<NamedTempFile> {
    let jar = NamedTempFile::new().context("failed to create scratch cookie jar")?;
    decode_cookies_from_env(var, jar.path())
        .with_context(|| format!("failed to restore cookies from {}", var))?;
    settings.account.cookie_path = jar.path().to_path_buf();
    Ok(jar)
}

/// Run the export job
pub async fn run_action_mode(args: ActionArgs) -> Result<()> {
    let log_level = init_logging(args.verbosity);

    let path = args
        .config
        .clone()
        .unwrap_or_else(ConfigLoader::default_config_path);
    let overrides = CliOverrides {
        cookies_first: true,
        ..CliOverrides::default()
    };
    let mut settings = ConfigLoader::new()
        .load_with_vars(
            Some(&path),
            &overrides,
            with_legacy_account(|key| std::env::var(key).ok()),
        )
        .context("failed to load configuration")?;
    log_level.apply_configured(&settings.logging.level);

    tracing::info!("baha-blacklist-action v{}", version::get_version());

    let _jar = restore_cookie_jar(&args.cookies_var, &mut settings)?;
    tracing::debug!("Cookie jar restored to {}", settings.account.cookie_path.display());

    let client = BlacklistClient::new(settings.clone())?;
    let summary = workflow::run(&client, &settings, &[Mode::Export], false).await?;

    tracing::info!(
        "Exported {} users to {}",
        summary.existing.len(),
        settings.blacklist.destination.display()
    );
    Ok(())
}
