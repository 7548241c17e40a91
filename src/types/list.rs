//! Friend-list pages and add categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lists shown on `friendList.php`, keyed by the `t` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Friends,
    Pending,
    Following,
    Followers,
    Blacklist,
}

impl ListKind {
    /// Page id used by the site
    pub fn page_id(self) -> u8 {
        match self {
            Self::Friends => 1,
            Self::Pending => 2,
            Self::Following => 3,
            Self::Followers => 4,
            Self::Blacklist => 5,
        }
    }

    /// Look up a list by its page id
    pub fn from_page_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Friends),
            2 => Some(Self::Pending),
            3 => Some(Self::Following),
            4 => Some(Self::Followers),
            5 => Some(Self::Blacklist),
            _ => None,
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Friends => "friends",
            Self::Pending => "pending",
            Self::Following => "following",
            Self::Followers => "followers",
            Self::Blacklist => "blacklist",
        };
        f.write_str(name)
    }
}

/// Category posted to `friend_add.php`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Add to the block list (`bad`)
    #[default]
    Blacklist,
    /// Any other category string the endpoint accepts
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Blacklist => "bad",
            Self::Other(value) => value,
        }
    }

    /// Human readable action for log lines
    pub fn action(&self) -> String {
        match self {
            Self::Blacklist => "add to blacklist".to_string(),
            Self::Other(value) => format!("add as '{}'", value),
        }
    }
}
