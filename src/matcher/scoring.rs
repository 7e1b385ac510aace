//! The five sub-scores combined by the matcher.
//!
//! Each function is pure and returns an unweighted value. Positive values lie in
//! `[0, 1]`; the capability, specialization and type scores can also return a
//! small negative penalty to separate "no overlap" from "nothing to compare".

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::tables::MatchTables;
use super::text::{specialization_terms, tokenize};
use crate::model::{Agent, Task, Template};

pub const NO_CAPABILITY_OVERLAP_PENALTY: f64 = -0.2;
pub const SPECIALIZATION_MISMATCH_PENALTY: f64 = -0.1;
pub const TYPE_MISMATCH_PENALTY: f64 = -0.2;
pub const BUSY_WORKLOAD_FACTOR: f64 = 0.3;
pub const NEW_AGENT_PERFORMANCE: f64 = 0.5;

/// Completed tasks at which the performance factor saturates.
const PERFORMANCE_SATURATION: f64 = 10.0;
const SPECIALIZATION_MISMATCH_THRESHOLD: f64 = 0.1;

/// Unweighted sub-scores for one agent/task pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub capability_match: f64,
    pub specialization_match: f64,
    pub type_match: f64,
    pub workload_factor: f64,
    pub performance_factor: f64,
}

impl ScoreBreakdown {
    pub fn compute(tables: &MatchTables, agent: &Agent, task: &Task) -> Self {
        let Some(template) = &agent.template else {
            return Self::default();
        };

        let task_tokens = task_tokens(task);
        Self {
            capability_match: capability_match(tables, template, task),
            specialization_match: specialization_match(template, &task_tokens),
            type_match: type_match(tables, template, &task_tokens),
            workload_factor: workload_factor(agent),
            performance_factor: performance_factor(agent),
        }
    }
}

/// Description tokens plus case-folded tags.
fn task_tokens(task: &Task) -> HashSet<String> {
    tokenize(&task.description)
        .chain(task.tags.iter().map(|t| t.trim().to_lowercase()))
        .filter(|t| !t.is_empty())
        .collect()
}

pub fn capability_match(tables: &MatchTables, template: &Template, task: &Task) -> f64 {
    if task.required_capabilities.is_empty() {
        return 1.0;
    }

    let agent_caps: HashSet<String> = template
        .capabilities
        .iter()
        .map(|c| c.trim().to_lowercase())
        .collect();

    let matched = task
        .required_capabilities
        .iter()
        .map(|c| c.trim().to_lowercase())
        .filter(|required| {
            agent_caps.contains(required)
                || agent_caps.iter().any(|have| tables.are_synonyms(have, required))
        })
        .count();

    if matched == 0 {
        NO_CAPABILITY_OVERLAP_PENALTY
    } else {
        matched as f64 / task.required_capabilities.len() as f64
    }
}

fn specialization_match(template: &Template, task_tokens: &HashSet<String>) -> f64 {
    let terms = template
        .specialization
        .as_deref()
        .map(specialization_terms)
        .unwrap_or_default();
    if terms.is_empty() {
        return 0.0;
    }

    let matched = terms.iter().filter(|t| task_tokens.contains(*t)).count();
    let fraction = matched as f64 / terms.len() as f64;
    if fraction < SPECIALIZATION_MISMATCH_THRESHOLD {
        SPECIALIZATION_MISMATCH_PENALTY
    } else {
        fraction
    }
}

fn type_match(tables: &MatchTables, template: &Template, task_tokens: &HashSet<String>) -> f64 {
    let Some(task_type) = tables.infer_type(task_tokens) else {
        return 0.0;
    };
    let agent_type = template.agent_type.trim().to_lowercase();
    if tables.is_compatible(&agent_type, task_type) {
        1.0
    } else {
        TYPE_MISMATCH_PENALTY
    }
}

fn workload_factor(agent: &Agent) -> f64 {
    if agent.current_task.is_none() {
        1.0
    } else {
        BUSY_WORKLOAD_FACTOR
    }
}

fn performance_factor(agent: &Agent) -> f64 {
    if agent.tasks_completed == 0 {
        NEW_AGENT_PERFORMANCE
    } else {
        (agent.tasks_completed as f64 / PERFORMANCE_SATURATION).min(1.0)
    }
}

/// Task type inferred from description and tags, if any keyword set matches.
pub fn inferred_task_type(tables: &MatchTables, task: &Task) -> Option<&'static str> {
    tables.infer_type(&task_tokens(task))
}
