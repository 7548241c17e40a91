//! Activity information of a blocked account

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Activity figures read from the account's profile block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub uid: String,
    /// Number of days the account visited the site
    pub visit_count: u32,
    /// Date of the last login
    pub last_login: NaiveDate,
}

impl UserInfo {
    pub fn new(uid: impl Into<String>, visit_count: u32, last_login: NaiveDate) -> Self {
        Self {
            uid: uid.into(),
            visit_count,
            last_login,
        }
    }

    /// Values used when the profile cannot be read.
    ///
    /// They never trigger a removal: one visit above the threshold and a
    /// login today.
    pub fn fallback(uid: impl Into<String>, min_visit: u32) -> Self {
        Self::new(uid, min_visit.saturating_add(1), Local::now().date_naive())
    }

    /// Whole days between the last login and `today`
    pub fn days_since_login(&self, today: NaiveDate) -> i64 {
        (today - self.last_login).num_days()
    }

    /// Reasons this account should be removed; empty means keep it
    pub fn removal_reasons(&self, min_visits: u32, min_days: i64, today: NaiveDate) -> Vec<String> {
        let mut reasons = Vec::new();
        if self.visit_count < min_visits {
            reasons.push(format!(
                "visit count ({}) below {}",
                self.visit_count, min_visits
            ));
        }

        let days = self.days_since_login(today);
        if days > min_days {
            reasons.push(format!("last login {} days ago (more than {})", days, min_days));
        }
        reasons
    }
}

impl fmt::Display for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UserInfo(uid={}, visit_count={}, last_login={})",
            self.uid,
            self.visit_count,
            self.last_login.format("%Y-%m-%d")
        )
    }
}
