//! Type definitions for the blacklist tool
//!
//! This module contains the main data structures shared by the session,
//! API and workflow layers.

pub mod list;
pub mod report;
pub mod serde_helpers;
pub mod user;

pub use list::{Category, ListKind};
pub use report::{BatchReport, OperationRecord, OperationStatus};
pub use user::UserInfo;
