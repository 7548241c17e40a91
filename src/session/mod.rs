//! Session management for the site
//!
//! This module handles the HTTP client, cookie jar import, login and the
//! CSRF tokens the site's mutation endpoints require.

pub mod client;
pub mod cookies;
pub mod endpoints;

pub use client::{CSRF_COOKIE, CSRF_HEADER, GamerSession, LoginMethod};
pub use cookies::{NetscapeCookie, load_cookie_file, parse_cookie_file};
pub use endpoints::Endpoints;
