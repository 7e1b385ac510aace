mod agent;
pub mod priority;
mod roster;
mod task;

pub use agent::{Agent, AgentStatus, Template};
pub use priority::{Priority, numeric_to_priority, priority_to_numeric};
pub use roster::Roster;
pub use task::{Task, TaskStatus};
