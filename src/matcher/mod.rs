//! Capability-based agent/task matching.
//!
//! [`CapabilityMatcher`] scores an agent against a task from five signals
//! (capability overlap, specialization overlap, type compatibility, workload and
//! throughput), picks the best idle agent for a task, ranks agents for
//! diagnostics and explains its decisions. Scoring never mutates agents or tasks.

mod explain;
mod scoring;
mod subscription;
mod tables;
mod text;
mod weights;

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{KEY_MIN_SCORE, MatcherConfig};
use crate::error::{MatchError, Result};
use crate::model::{Agent, Task};

pub use scoring::ScoreBreakdown;
pub use subscription::ConfigSubscription;
pub use tables::MatchTables;
pub use weights::{MatchWeights, WeightUpdate};

/// Mutable part of the matcher, shared between clones and the config listener.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Settings {
    weights: MatchWeights,
    min_score: f64,
}

impl Settings {
    /// Validate first so a rejected config leaves every field untouched.
    fn apply(&mut self, config: &MatcherConfig) -> Result<()> {
        config.validate()?;
        self.weights.merge(&config.weights);
        if let Some(min) = config.min_score {
            self.min_score = min;
        }
        Ok(())
    }
}

/// Final score together with the unweighted sub-scores it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredMatch {
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// An agent with its score, as returned by [`CapabilityMatcher::rank_agents`].
#[derive(Debug, Clone, Copy)]
pub struct RankedAgent<'a> {
    pub agent: &'a Agent,
    pub score: f64,
}

/// Scores agents against tasks and selects the best fit.
///
/// Clones share weights and threshold, so an update through one handle (or
/// through a config subscription) is seen by all of them.
#[derive(Debug, Clone)]
pub struct CapabilityMatcher {
    settings: Arc<RwLock<Settings>>,
    tables: Arc<MatchTables>,
}

impl Default for CapabilityMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CapabilityMatcher {
    /// Matcher with default weights and a minimum score of 0.
    pub fn new() -> Self {
        Self {
            settings: Arc::new(RwLock::new(Settings::default())),
            tables: Arc::new(MatchTables::new()),
        }
    }

    /// Matcher with the overrides in `config` applied on top of the defaults.
    pub fn from_config(config: &MatcherConfig) -> Result<Self> {
        let matcher = Self::new();
        matcher.write_settings(|s| s.apply(config))?;
        Ok(matcher)
    }

    fn read_settings(&self) -> Settings {
        *self.settings.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_settings<T>(&self, f: impl FnOnce(&mut Settings) -> T) -> T {
        let mut guard = self.settings.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }

    pub fn score_agent(&self, agent: &Agent, task: &Task) -> f64 {
        self.score_agent_with_breakdown(agent, task).score
    }

    pub fn score_agent_with_breakdown(&self, agent: &Agent, task: &Task) -> ScoredMatch {
        let weights = self.read_settings().weights;
        self.score_with(&weights, agent, task)
    }

    fn score_with(&self, weights: &MatchWeights, agent: &Agent, task: &Task) -> ScoredMatch {
        let breakdown = ScoreBreakdown::compute(&self.tables, agent, task);
        let score = weights.combine(&breakdown);
        debug!(
            agent_id = %agent.id,
            task_id = %task.id,
            capability = breakdown.capability_match,
            specialization = breakdown.specialization_match,
            type_match = breakdown.type_match,
            workload = breakdown.workload_factor,
            performance = breakdown.performance_factor,
            score,
            "Scored agent"
        );
        ScoredMatch { score, breakdown }
    }

    /// Best idle agent for `task`, or `None` when no idle agent exists or the
    /// best score is below the configured minimum. Ties keep input order.
    pub fn find_best_agent<'a>(&self, agents: &'a [Agent], task: &Task) -> Option<&'a Agent> {
        self.find_best_index(agents, task).map(|i| &agents[i])
    }

    /// Position in `agents` of the agent [`find_best_agent`](Self::find_best_agent)
    /// would return.
    pub fn find_best_index(&self, agents: &[Agent], task: &Task) -> Option<usize> {
        let candidates: Vec<usize> = agents
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_idle())
            .map(|(i, _)| i)
            .collect();
        if candidates.is_empty() {
            warn!(task_id = %task.id, total = agents.len(), "No idle agents available");
            return None;
        }

        let settings = self.read_settings();
        let mut scored: Vec<(usize, f64)> = candidates
            .into_iter()
            .map(|i| (i, self.score_with(&settings.weights, &agents[i], task).score))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let (index, score) = scored[0];
        let best = &agents[index];
        if score < settings.min_score {
            warn!(
                task_id = %task.id,
                agent_id = %best.id,
                score,
                min_score = settings.min_score,
                "Best agent score below threshold"
            );
            return None;
        }

        info!(
            task_id = %task.id,
            agent_id = %best.id,
            score,
            candidates = scored.len(),
            "Selected best agent"
        );
        Some(index)
    }

    /// Every supplied agent with its score, best first. Unlike
    /// [`find_best_agent`](Self::find_best_agent) this does not filter on status.
    pub fn rank_agents<'a>(&self, agents: &'a [Agent], task: &Task) -> Vec<RankedAgent<'a>> {
        let weights = self.read_settings().weights;
        let mut ranked: Vec<RankedAgent<'a>> = agents
            .iter()
            .map(|agent| RankedAgent {
                agent,
                score: self.score_with(&weights, agent, task).score,
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// Human-readable summary of why `agent` scores the way it does for `task`.
    pub fn get_match_explanation(&self, agent: &Agent, task: &Task) -> String {
        let scored = self.score_agent_with_breakdown(agent, task);
        explain::render(agent, task, &scored.breakdown, scored.score)
    }

    /// Task type inferred from the task's description and tags.
    pub fn infer_task_type(&self, task: &Task) -> Option<&'static str> {
        scoring::inferred_task_type(&self.tables, task)
    }

    /// Merge `update` into the current weights. Non-finite values are rejected
    /// and nothing is changed.
    pub fn update_weights(&self, update: WeightUpdate) -> Result<()> {
        update.validate()?;
        self.write_settings(|s| s.weights.merge(&update));
        debug!(?update, "Updated matcher weights");
        Ok(())
    }

    pub fn get_weights(&self) -> MatchWeights {
        self.read_settings().weights
    }

    pub fn min_score(&self) -> f64 {
        self.read_settings().min_score
    }

    pub fn set_min_score(&self, min_score: f64) -> Result<()> {
        if !min_score.is_finite() {
            return Err(MatchError::InvalidValue {
                key: KEY_MIN_SCORE.to_string(),
                value: min_score,
            });
        }
        self.write_settings(|s| s.min_score = min_score);
        Ok(())
    }

    /// Apply the keys that differ between `prev` and `next`.
    fn apply_config_change(&self, prev: &MatcherConfig, next: &MatcherConfig) {
        let changed = MatcherConfig {
            weights: prev.weights.changed_in(&next.weights),
            min_score: if weights::same_value(prev.min_score, next.min_score) {
                None
            } else {
                next.min_score
            },
        };
        if changed.weights.is_empty() && changed.min_score.is_none() {
            return;
        }
        match self.write_settings(|s| s.apply(&changed)) {
            Ok(()) => info!(
                weights = ?changed.weights,
                min_score = ?changed.min_score,
                "Reloaded matcher config"
            ),
            Err(e) => warn!(error = %e, "Ignoring invalid matcher config"),
        }
    }
}
