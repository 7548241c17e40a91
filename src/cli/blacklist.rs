//! Blacklist mode CLI logic
//!
//! Loads the layered configuration, logs in and runs the requested modes.

use crate::{
    api::BlacklistClient,
    cli::logging::{Verbosity, init_logging},
    config::{CliOverrides, ConfigLoader, Settings},
    utils::version,
    workflow::{self, Mode},
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Arguments for a blacklist run
#[derive(Debug, Clone)]
pub struct BlacklistArgs {
    /// Explicit config file; the default location is used otherwise
    pub config: Option<PathBuf>,
    pub overrides: CliOverrides,
    /// Modes to run; empty runs every mode
    pub modes: Vec<Mode>,
    pub force_clean: bool,
    pub verbosity: Verbosity,
}

impl BlacklistArgs {
    /// Requested modes, or [`Mode::ALL`] when none were given
    pub fn effective_modes(&self) -> Vec<Mode> {
        if self.modes.is_empty() {
            Mode::ALL.to_vec()
        } else {
            self.modes.clone()
        }
    }
}

/// Load settings for a run
pub fn load_settings(config: Option<&Path>, overrides: &CliOverrides) -> Result<Settings> {
    let path = config
        .map(Path::to_path_buf)
        .unwrap_or_else(ConfigLoader::default_config_path);
    ConfigLoader::new()
        .load(Some(&path), overrides)
        .context("failed to load configuration")
}

/// Run the blacklist tool with the given arguments
pub async fn run_blacklist_mode(args: BlacklistArgs) -> Result<()> {
    let log_level = init_logging(args.verbosity);
    let settings = load_settings(args.config.as_deref(), &args.overrides)?;
    log_level.apply_configured(&settings.logging.level);

    let modes = args.effective_modes();

    tracing::info!("baha-blacklist v{}", version::get_version());
    tracing::debug!(
        "min_sleep={} max_sleep={} min_visit={} min_day={} friend_num={}",
        settings.pacing.min_sleep,
        settings.pacing.max_sleep,
        settings.clean.min_visit,
        settings.clean.min_day,
        settings.clean.friend_num
    );

    let client = BlacklistClient::new(settings.clone())?;
    let summary = workflow::run(&client, &settings, &modes, args.force_clean).await?;

    if let Some(report) = &summary.added {
        tracing::info!("Added {}/{} users", report.success_count(), report.len());
    }
    if let Some(report) = &summary.cleaned {
        tracing::info!("Checked {} users during clean", report.len());
    }
    tracing::info!("Done");
    Ok(())
}
