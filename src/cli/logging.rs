//! Logging setup shared by the binaries

use tracing_subscriber::{
    EnvFilter, Registry, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

/// Console verbosity chosen on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Warnings and errors only
    Quiet,
    /// The configured level
    #[default]
    Normal,
    /// Debug output
    Verbose,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (_, true) => Self::Verbose,
            (true, false) => Self::Quiet,
            (false, false) => Self::Normal,
        }
    }

    /// Filter directive used when `RUST_LOG` is not set
    pub fn directive(self, configured: &str) -> String {
        match self {
            Self::Quiet => "warn".to_string(),
            Self::Verbose => "debug".to_string(),
            Self::Normal if configured.trim().is_empty() => "info".to_string(),
            Self::Normal => configured.trim().to_string(),
        }
    }
}

/// Level used until the configuration has been read
pub const DEFAULT_LEVEL: &str = "info";

/// Adjusts the installed filter once the configured level is known
#[derive(Debug)]
pub struct LogLevelHandle {
    verbosity: Verbosity,
    /// `None` when `RUST_LOG` chose the filter
    reload: Option<reload::Handle<EnvFilter, Registry>>,
}

impl LogLevelHandle {
    /// Switch to `logging.level`; flags and `RUST_LOG` keep precedence
    pub fn apply_configured(&self, configured: &str) {
        let Some(handle) = &self.reload else {
            return;
        };
        if self.verbosity != Verbosity::Normal {
            return;
        }

        let directive = self.verbosity.directive(configured);
        if let Err(e) = handle.reload(EnvFilter::new(&directive)) {
            tracing::warn!("Cannot apply log level {}: {}", directive, e);
        }
    }
}

/// Install the stderr subscriber; `RUST_LOG` takes precedence
pub fn init_logging(verbosity: Verbosity) -> LogLevelHandle {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(verbosity.directive(DEFAULT_LEVEL)), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    LogLevelHandle {
        verbosity,
        reload: (!from_env).then_some(handle),
    }
}
