use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::priority::{Priority, priority_to_numeric};

/// Lifecycle status of a task. Transitions are driven by the orchestrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Queued,
    Validated,
    Ready,
    Assigned,
    InProgress,
    Completed,
    Failed,
    Blocked,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Queued => write!(f, "queued"),
            TaskStatus::Validated => write!(f, "validated"),
            TaskStatus::Ready => write!(f, "ready"),
            TaskStatus::Assigned => write!(f, "assigned"),
            TaskStatus::InProgress => write!(f, "in-progress"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Failed => write!(f, "failed"),
            TaskStatus::Blocked => write!(f, "blocked"),
        }
    }
}

/// A unit of work waiting to be matched to an agent.
///
/// `required_capabilities` and `tags` are advisory and only feed scoring. The
/// relation fields (`depends_on`, `prefers`, `blocked_by`, `conflicts_with`)
/// are carried for the orchestrator; nothing in this crate resolves them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Symbolic priority as supplied. Unrecognized values are kept and
    /// ordered at the default level.
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub numeric_priority: Option<i64>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub required_capabilities: Vec<String>,
    /// Hard prerequisites.
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// Soft ordering hints.
    #[serde(default)]
    pub prefers: Vec<String>,
    #[serde(default)]
    pub blocked_by: Vec<String>,
    /// Tasks that must not run at the same time as this one.
    #[serde(default)]
    pub conflicts_with: Vec<String>,
    /// Estimate in minutes.
    #[serde(default)]
    pub estimated_duration: Option<u32>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            priority: None,
            numeric_priority: None,
            status: TaskStatus::Queued,
            tags: Vec::new(),
            required_capabilities: Vec::new(),
            depends_on: Vec::new(),
            prefers: Vec::new(),
            blocked_by: Vec::new(),
            conflicts_with: Vec::new(),
            estimated_duration: None,
            assigned_to: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority.to_string());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_required_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_capabilities = capabilities.into_iter().map(Into::into).collect();
        self
    }

    /// Numeric priority used for ordering: the explicit value when present,
    /// otherwise the codec value of the symbolic priority.
    pub fn effective_priority(&self) -> i64 {
        self.numeric_priority.unwrap_or_else(|| priority_to_numeric(self.priority.as_deref()))
    }

    /// The symbolic priority, if it names one of the three levels.
    pub fn symbolic_priority(&self) -> Option<Priority> {
        self.priority.as_deref().and_then(Priority::parse)
    }

    /// Whether the task is still waiting for an agent.
    pub fn is_pending(&self) -> bool {
        matches!(
            self.status,
            TaskStatus::Queued | TaskStatus::Validated | TaskStatus::Ready
        )
    }
}
