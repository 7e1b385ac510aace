use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric value used for a missing or unrecognized symbolic priority.
pub const DEFAULT_NUMERIC_PRIORITY: i64 = 25;

/// Three-level symbolic task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Parse a symbolic priority, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn numeric(self) -> i64 {
        match self {
            Priority::High => 100,
            Priority::Medium => 50,
            Priority::Low => 10,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// Step function from a symbolic priority to the numeric scale.
///
/// Unrecognized or absent input maps to [`DEFAULT_NUMERIC_PRIORITY`].
pub fn priority_to_numeric(priority: Option<&str>) -> i64 {
    priority
        .and_then(Priority::parse)
        .map(Priority::numeric)
        .unwrap_or(DEFAULT_NUMERIC_PRIORITY)
}

/// Threshold function from the numeric scale back to a symbolic priority.
///
/// Not an exact inverse of [`priority_to_numeric`]: the default value 25
/// decodes to `Low`.
pub fn numeric_to_priority(n: i64) -> Priority {
    if n >= 100 {
        Priority::High
    } else if n >= 50 {
        Priority::Medium
    } else {
        Priority::Low
    }
}
