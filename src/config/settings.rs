//! Configuration settings structure
//!
//! Defines the main settings structure and loading logic for the blacklist tool.

use crate::{Error, Result, types::serde_helpers::parse_flexible_bool};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Placeholder account name shipped in example configs.
pub const PLACEHOLDER_ACCOUNT: &str = "your account here";

/// Shared block list maintained by the project.
pub const DEFAULT_BLACKLIST_SOURCE: &str =
    "https://github.com/ZhenShuo2021/baha-blacklist/raw/refs/heads/main/blacklist.txt";

/// Desktop browser user agent; the site rejects obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Main configuration settings for the blacklist tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Login configuration
    pub account: AccountSettings,
    /// Block list source and destination
    pub blacklist: BlacklistSettings,
    /// Pauses between requests
    pub pacing: PacingSettings,
    /// Thresholds for the clean mode
    pub clean: CleanSettings,
    /// HTTP client configuration
    pub network: NetworkSettings,
    /// Site base URLs
    pub endpoints: EndpointSettings,
    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Account and authentication configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountSettings {
    /// Account (user id) whose block list is maintained
    pub account: String,
    /// Password; password login is skipped when empty
    pub password: String,
    /// Netscape cookie jar file
    pub cookie_path: PathBuf,
    /// Try the cookie jar before the password
    pub cookies_first: bool,
}

/// Block list source and export destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlacklistSettings {
    /// URL or file path of the shared block list
    pub source: String,
    /// File the exported block list is written to
    pub destination: PathBuf,
}

/// Randomized pause bounds, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingSettings {
    pub min_sleep: f64,
    pub max_sleep: f64,
}

/// Clean mode thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanSettings {
    /// Accounts with fewer site visits than this are removed
    pub min_visit: u32,
    /// Accounts whose last login is more than this many days ago are removed
    pub min_day: i64,
    /// Clean only runs when the block list holds more entries than this
    pub friend_num: usize,
}

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    pub user_agent: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    pub https_proxy: Option<String>,
    pub http_proxy: Option<String>,
    pub all_proxy: Option<String>,
}

/// Base URLs of the site's hosts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSettings {
    pub www: String,
    pub home: String,
    pub user: String,
    pub api: String,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level
    pub level: String,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            account: String::new(),
            password: String::new(),
            cookie_path: PathBuf::from("./cookies.txt"),
            cookies_first: false,
        }
    }
}

impl Default for BlacklistSettings {
    fn default() -> Self {
        Self {
            source: DEFAULT_BLACKLIST_SOURCE.to_string(),
            destination: PathBuf::from("./blacklist.txt"),
        }
    }
}

impl Default for PacingSettings {
    fn default() -> Self {
        Self {
            min_sleep: 1.0,
            max_sleep: 3.5,
        }
    }
}

impl Default for CleanSettings {
    fn default() -> Self {
        Self {
            min_visit: 10,
            min_day: 360,
            friend_num: 1000,
        }
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            https_proxy: None,
            http_proxy: None,
            all_proxy: None,
        }
    }
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            www: "https://www.gamer.com.tw/".to_string(),
            home: "https://home.gamer.com.tw/".to_string(),
            user: "https://user.gamer.com.tw/".to_string(),
            api: "https://api.gamer.com.tw/".to_string(),
        }
    }
}

impl EndpointSettings {
    /// Point every host at one base URL (mock servers, local proxies)
    pub fn all(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            www: base.clone(),
            home: base.clone(),
            user: base.clone(),
            api: base,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Values given on the command line; `None` leaves the setting untouched
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub account: Option<String>,
    pub password: Option<String>,
    pub cookie_path: Option<PathBuf>,
    pub cookies_first: bool,
    pub blacklist_source: Option<String>,
    pub blacklist_destination: Option<PathBuf>,
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Invalid config file {}: {}", path.display(), e)))
    }

    /// Load settings from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        Self::default().merge_with_env()
    }

    /// Apply environment variable overrides
    pub fn merge_with_env(self) -> Result<Self> {
        self.merge_with_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn merge_with_vars<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(account) = lookup("BAHA_ACCOUNT") {
            self.account.account = account;
        }
        if let Some(password) = lookup("BAHA_PASSWORD") {
            self.account.password = password;
        }
        if let Some(path) = lookup("BAHA_COOKIE_PATH") {
            self.account.cookie_path = PathBuf::from(path);
        }
        if let Some(flag) = lookup("BAHA_COOKIES_FIRST") {
            self.account.cookies_first = parse_flexible_bool(&flag)
                .ok_or_else(|| Error::config(format!("Invalid BAHA_COOKIES_FIRST: {}", flag)))?;
        }
        if let Some(source) = lookup("BAHA_BLACKLIST_SRC") {
            self.blacklist.source = source;
        }
        if let Some(dest) = lookup("BAHA_BLACKLIST_DEST") {
            self.blacklist.destination = PathBuf::from(dest);
        }

        if let Some(value) = lookup("BAHA_MIN_SLEEP") {
            self.pacing.min_sleep = parse_var("BAHA_MIN_SLEEP", &value)?;
        }
        if let Some(value) = lookup("BAHA_MAX_SLEEP") {
            self.pacing.max_sleep = parse_var("BAHA_MAX_SLEEP", &value)?;
        }
        if let Some(value) = lookup("BAHA_MIN_VISIT") {
            self.clean.min_visit = parse_var("BAHA_MIN_VISIT", &value)?;
        }
        if let Some(value) = lookup("BAHA_MIN_DAY") {
            self.clean.min_day = parse_var("BAHA_MIN_DAY", &value)?;
        }
        if let Some(value) = lookup("BAHA_FRIEND_NUM") {
            self.clean.friend_num = parse_var("BAHA_FRIEND_NUM", &value)?;
        }

        if let Some(level) = lookup("BAHA_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(user_agent) = lookup("BAHA_USER_AGENT") {
            self.network.user_agent = user_agent;
        }
        if let Some(proxy) = lookup("HTTPS_PROXY") {
            self.network.https_proxy = Some(proxy);
        }
        if let Some(proxy) = lookup("HTTP_PROXY") {
            self.network.http_proxy = Some(proxy);
        }
        if let Some(proxy) = lookup("ALL_PROXY") {
            self.network.all_proxy = Some(proxy);
        }

        Ok(self)
    }

    /// Apply command line overrides
    pub fn apply_overrides(mut self, overrides: &CliOverrides) -> Self {
        if let Some(account) = &overrides.account {
            self.account.account = account.clone();
        }
        if let Some(password) = &overrides.password {
            self.account.password = password.clone();
        }
        if let Some(path) = &overrides.cookie_path {
            self.account.cookie_path = path.clone();
        }
        if overrides.cookies_first {
            self.account.cookies_first = true;
        }
        if let Some(source) = &overrides.blacklist_source {
            self.blacklist.source = source.clone();
        }
        if let Some(dest) = &overrides.blacklist_destination {
            self.blacklist.destination = dest.clone();
        }
        self
    }

    /// Validate the final configuration
    pub fn validate(&self) -> Result<()> {
        let account = self.account.account.trim();
        if account.is_empty() || account == PLACEHOLDER_ACCOUNT {
            return Err(Error::config(
                "account is not set; pass -a/--account or set it in the config file",
            ));
        }

        if self.pacing.min_sleep < 0.0 || self.pacing.max_sleep < 0.0 {
            return Err(Error::config("min_sleep and max_sleep must not be negative"));
        }
        if self.pacing.min_sleep > self.pacing.max_sleep {
            return Err(Error::config(format!(
                "min_sleep ({}) must not exceed max_sleep ({})",
                self.pacing.min_sleep, self.pacing.max_sleep
            )));
        }

        for (name, base) in [
            ("www", &self.endpoints.www),
            ("home", &self.endpoints.home),
            ("user", &self.endpoints.user),
            ("api", &self.endpoints.api),
        ] {
            url::Url::parse(base)
                .map_err(|e| Error::config(format!("Invalid {} endpoint {}: {}", name, base, e)))?;
        }

        Ok(())
    }

    /// Proxy URL with HTTPS > HTTP > ALL priority
    pub fn get_proxy_url(&self) -> Option<&str> {
        self.network
            .https_proxy
            .as_deref()
            .or(self.network.http_proxy.as_deref())
            .or(self.network.all_proxy.as_deref())
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::config(format!("Invalid {}: {}", key, e)))
}
