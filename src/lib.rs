//! Capability-based agent/task matching engine.
//!
//! Given a registry of [`Agent`]s and a [`Task`], the [`CapabilityMatcher`]
//! scores each agent on capability overlap, specialization overlap, type
//! compatibility, workload and throughput, then selects or ranks them.

pub mod cli;
pub mod config;
pub mod error;
pub mod matcher;
pub mod model;
pub mod planner;
pub mod ui;

pub use config::{AppConfig, ConfigSource, MatcherConfig};
pub use error::{MatchError, Result};
pub use matcher::{
    CapabilityMatcher, ConfigSubscription, MatchWeights, RankedAgent, ScoreBreakdown, ScoredMatch,
    WeightUpdate,
};
pub use model::{Agent, AgentStatus, Priority, Roster, Task, TaskStatus, Template};
