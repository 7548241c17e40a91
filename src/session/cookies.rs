//! Netscape cookie jar files
//!
//! Browser extensions export sessions as tab separated lines:
//! `domain  include_subdomains  path  secure  expires  name  value`.
//! `#HttpOnly_` in front of the domain marks HTTP-only cookies; any other
//! line starting with `#` is a comment.

use crate::{Error, Result};
use chrono::Utc;
use std::path::Path;

const HTTP_ONLY_PREFIX: &str = "#HttpOnly_";

/// One cookie line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetscapeCookie {
    pub domain: String,
    pub include_subdomains: bool,
    pub path: String,
    pub secure: bool,
    /// Unix timestamp; `None` for session cookies
    pub expires: Option<i64>,
    pub name: String,
    pub value: String,
    pub http_only: bool,
}

impl NetscapeCookie {
    pub fn is_expired(&self, now: i64) -> bool {
        matches!(self.expires, Some(ts) if ts < now)
    }
}

/// Parse jar file content.
///
/// Expired cookies and cookies with an empty value are dropped.
pub fn parse_cookie_file(content: &str) -> Result<Vec<NetscapeCookie>> {
    let now = Utc::now().timestamp();
    let mut cookies = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        let (line, http_only) = match line.strip_prefix(HTTP_ONLY_PREFIX) {
            Some(rest) => (rest, true),
            None => (line, false),
        };

        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 7 {
            return Err(Error::cookie_file(
                format!("line {}", index + 1),
                format!("expected 7 tab separated fields, found {}", fields.len()),
            ));
        }

        let expires = match fields[4].trim() {
            "" | "0" => None,
            ts => Some(ts.parse::<i64>().map_err(|_| {
                Error::cookie_file(
                    format!("line {}", index + 1),
                    format!("invalid expiry '{}'", ts),
                )
            })?),
        };

        let cookie = NetscapeCookie {
            domain: fields[0].to_string(),
            include_subdomains: fields[1].eq_ignore_ascii_case("TRUE"),
            path: fields[2].to_string(),
            secure: fields[3].eq_ignore_ascii_case("TRUE"),
            expires,
            name: fields[5].to_string(),
            value: fields[6].to_string(),
            http_only,
        };

        if cookie.value.is_empty() || cookie.is_expired(now) {
            continue;
        }
        cookies.push(cookie);
    }

    Ok(cookies)
}

/// Read and parse a jar file
pub fn load_cookie_file(path: &Path) -> Result<Vec<NetscapeCookie>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::cookie_file(path.display().to_string(), e.to_string()))?;
    parse_cookie_file(&content).map_err(|e| match e {
        Error::CookieFile { path: line, reason } => {
            Error::cookie_file(path.display().to_string(), format!("{}: {}", line, reason))
        }
        other => other,
    })
}
