//! Error type definitions
//!
//! Defines the main error types used throughout the blacklist tool.

use thiserror::Error;

/// Main error type for the blacklist tool
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Every login method failed or the session is not authenticated
    #[error("Login failed: {0}")]
    Login(String),

    /// CSRF token could not be obtained
    #[error("CSRF token error: {0}")]
    Csrf(String),

    /// Cookie jar file errors
    #[error("Cookie file error: {path}: {reason}")]
    CookieFile { path: String, reason: String },

    /// The site answered with something we could not interpret
    #[error("Unexpected response from {endpoint}: {details}")]
    SiteResponse { endpoint: String, details: String },

    /// A batch stopped after too many consecutive failures
    #[error("Aborted after {failures} consecutive failures ({processed}/{total})")]
    Aborted {
        failures: usize,
        processed: usize,
        total: usize,
    },

    /// Network/HTTP client errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Date/time parsing errors
    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    /// TOML configuration parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Base64 decoding errors
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded bytes were not UTF-8
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new login error
    pub fn login(msg: impl Into<String>) -> Self {
        Self::Login(msg.into())
    }

    /// Create a new CSRF error
    pub fn csrf(msg: impl Into<String>) -> Self {
        Self::Csrf(msg.into())
    }

    /// Create a cookie file error
    pub fn cookie_file(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CookieFile {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a site response error
    pub fn site_response(endpoint: impl Into<String>, details: impl Into<String>) -> Self {
        Self::SiteResponse {
            endpoint: endpoint.into(),
            details: details.into(),
        }
    }

    /// Create an aborted batch error
    pub fn aborted(failures: usize, processed: usize, total: usize) -> Self {
        Self::Aborted {
            failures,
            processed,
            total,
        }
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
