use std::convert::Infallible;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const STATUS_TODO: &str = "todo";
pub const STATUS_IN_PROGRESS: &str = "in-progress";
pub const STATUS_DONE: &str = "done";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Description")]
    pub description: String,
    /// Free-form label; `todo`, `in-progress` and `done` by convention.
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "UpdatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(id: u64, description: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            description,
            status: STATUS_TODO.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now < self.created_at {
            self.created_at
        } else {
            now
        };
    }
}

/// Selects tasks for `list`: `all`, or an exact status match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Status(String),
}

impl Filter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Status(s) => task.status == *s,
        }
    }
}

impl FromStr for Filter {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "all" => Self::All,
            other => Self::Status(other.to_string()),
        })
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Status(s) => write!(f, "{s}"),
        }
    }
}
