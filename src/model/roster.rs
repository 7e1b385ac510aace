//! Loading agents and tasks from a roster file.
//!
//! A roster is either JSON (`{"agents": [...], "tasks": [...]}`) or TOML
//! (`[[agents]]` / `[[tasks]]` arrays), selected by file extension.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Agent, Task};
use crate::error::{MatchError, Result};

/// Snapshot of an agent registry and task queue supplied by an orchestrator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub agents: Vec<Agent>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Roster {
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let contents = std::fs::read_to_string(path)?;
        match extension.as_str() {
            "json" => Ok(serde_json::from_str(&contents)?),
            "toml" => Ok(toml::from_str(&contents)?),
            _ => Err(MatchError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn task(&self, id: &str) -> Result<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| MatchError::TaskNotFound(id.to_string()))
    }

    pub fn agent(&self, id: &str) -> Result<&Agent> {
        self.agents
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| MatchError::AgentNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AgentStatus;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn load_json_roster() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "roster.json",
            r#"{
                "agents": [{"id": "fe-1", "template": {"type": "frontend", "capabilities": ["react"]}}],
                "tasks": [{"id": "t-1", "description": "Build a React component"}]
            }"#,
        );

        let roster = Roster::load(&path).unwrap();
        assert_eq!(roster.agents.len(), 1);
        assert_eq!(roster.tasks.len(), 1);
        assert_eq!(roster.agent("fe-1").unwrap().status, AgentStatus::Idle);
        assert_eq!(
            roster.task("t-1").unwrap().description,
            "Build a React component"
        );
    }

    #[test]
    fn load_toml_roster() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "roster.toml",
            r#"
                [[agents]]
                id = "ops-1"
                status = "working"
                current_task = "t-9"
                tasks_completed = 4

                [agents.template]
                type = "devops"
                specialization = "docker kubernetes"
                capabilities = ["docker", "kubernetes"]

                [[tasks]]
                id = "t-1"
                title = "Deploy"
                priority = "high"
                required_capabilities = ["kubernetes"]
            "#,
        );

        let roster = Roster::load(&path).unwrap();
        let agent = roster.agent("ops-1").unwrap();
        assert_eq!(agent.status, AgentStatus::Working);
        assert_eq!(agent.current_task.as_deref(), Some("t-9"));
        assert_eq!(agent.tasks_completed, 4);
        assert_eq!(roster.task("t-1").unwrap().effective_priority(), 100);
    }

    #[test]
    fn loose_priorities_do_not_reject_roster() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "roster.toml",
            r#"
                [[tasks]]
                id = "t-urgent"
                priority = "urgent"

                [[tasks]]
                id = "t-high"
                priority = "High"

                [[tasks]]
                id = "t-none"
            "#,
        );

        let roster = Roster::load(&path).unwrap();
        assert_eq!(roster.tasks.len(), 3);
        assert_eq!(roster.task("t-urgent").unwrap().effective_priority(), 25);
        assert_eq!(roster.task("t-high").unwrap().effective_priority(), 100);
        assert_eq!(roster.task("t-none").unwrap().effective_priority(), 25);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "roster.yaml", "agents: []");
        let err = Roster::load(&path).unwrap_err();
        assert!(matches!(err, MatchError::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_ids_are_reported() {
        let roster = Roster::default();
        assert!(matches!(
            roster.task("nope"),
            Err(MatchError::TaskNotFound(id)) if id == "nope"
        ));
        assert!(matches!(
            roster.agent("ghost"),
            Err(MatchError::AgentNotFound(id)) if id == "ghost"
        ));
    }
}
