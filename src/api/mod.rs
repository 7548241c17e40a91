//! Block list API
//!
//! Operations against the site's friend list endpoints and the parsers for
//! their replies.

pub mod blacklist;
pub mod parse;

pub use blacklist::{BlacklistClient, MAX_CONSECUTIVE_FAILURES};
