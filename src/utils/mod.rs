//! Utility functions and helpers
//!
//! This module contains utility functions used throughout the application.

pub mod base64;
pub mod pacing;
pub mod users;
pub mod version;

pub use pacing::Pacer;
pub use users::{load_users, parse_users, write_users};
pub use version::{VERSION, get_version};
