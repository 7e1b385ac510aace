//! Dry-run assignment preview.
//!
//! Walks pending tasks highest priority first and asks the matcher for the best
//! idle agent each time, marking chosen agents busy on a private copy of the
//! registry. The caller's agents and tasks are left untouched; committing the
//! plan is up to the orchestrator.

use serde::Serialize;
use tracing::info;

use crate::matcher::CapabilityMatcher;
use crate::model::{Agent, AgentStatus, Task};

/// One row of an assignment preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedAssignment {
    pub task_id: String,
    pub task_title: String,
    pub priority: i64,
    /// `None` when no idle agent was available or good enough.
    pub agent_id: Option<String>,
    pub score: f64,
    pub explanation: String,
}

/// Pending tasks ordered by effective priority, highest first. Equal
/// priorities keep their input order.
pub fn pending_by_priority(tasks: &[Task]) -> Vec<&Task> {
    let mut pending: Vec<&Task> = tasks.iter().filter(|t| t.is_pending()).collect();
    pending.sort_by_key(|t| std::cmp::Reverse(t.effective_priority()));
    pending
}

pub fn plan_assignments(
    matcher: &CapabilityMatcher,
    agents: &[Agent],
    tasks: &[Task],
) -> Vec<PlannedAssignment> {
    let mut registry: Vec<Agent> = agents.to_vec();
    let mut plan = Vec::new();

    for task in pending_by_priority(tasks) {
        let row = match matcher.find_best_index(&registry, task) {
            Some(index) => {
                let agent = &mut registry[index];
                let scored = matcher.score_agent_with_breakdown(agent, task);
                let explanation = matcher.get_match_explanation(agent, task);
                agent.status = AgentStatus::Working;
                agent.current_task = Some(task.id.clone());
                PlannedAssignment {
                    task_id: task.id.clone(),
                    task_title: task.title.clone(),
                    priority: task.effective_priority(),
                    agent_id: Some(agent.id.clone()),
                    score: scored.score,
                    explanation,
                }
            }
            None => PlannedAssignment {
                task_id: task.id.clone(),
                task_title: task.title.clone(),
                priority: task.effective_priority(),
                agent_id: None,
                score: 0.0,
                explanation: "No suitable agent found".to_string(),
            },
        };
        plan.push(row);
    }

    let assigned = plan.iter().filter(|p| p.agent_id.is_some()).count();
    info!(tasks = plan.len(), assigned, "Planned assignments");
    plan
}
