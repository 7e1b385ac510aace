use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a worker, driven by the orchestrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    #[default]
    Idle,
    Working,
    Error,
    Offline,
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentStatus::Idle => write!(f, "idle"),
            AgentStatus::Working => write!(f, "working"),
            AgentStatus::Error => write!(f, "error"),
            AgentStatus::Offline => write!(f, "offline"),
        }
    }
}

/// Capability profile attached to an agent when it is provisioned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Categorical tag such as "frontend" or "fullstack".
    #[serde(rename = "type")]
    pub agent_type: String,
    /// Free-text descriptive terms, comma or space delimited.
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl Template {
    pub fn new(agent_type: impl Into<String>) -> Self {
        Self {
            agent_type: agent_type.into(),
            specialization: None,
            capabilities: Vec::new(),
        }
    }

    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = Some(specialization.into());
        self
    }

    pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities = capabilities.into_iter().map(Into::into).collect();
        self
    }
}

/// A worker able to execute tasks. Read-only from the matcher's point of view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    #[serde(default)]
    pub status: AgentStatus,
    /// Id of the task currently held. The orchestrator owns the task itself.
    #[serde(default)]
    pub current_task: Option<String>,
    #[serde(default)]
    pub tasks_completed: u32,
    #[serde(default)]
    pub template: Option<Template>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Agent {
    pub fn new(template: Option<Template>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            status: AgentStatus::Idle,
            current_task: None,
            tasks_completed: 0,
            template,
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn is_idle(&self) -> bool {
        self.status == AgentStatus::Idle
    }
}
