//! Command-line interface built on clap.
//!
//! Defines [`Cli`] with the [`Command`] subcommands (rank, best, explain, plan,
//! weights) and global flags (--config, --min-score, --verbose).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// agentmatch: pick the best agent for a task and explain why.
#[derive(Debug, Parser)]
#[command(name = "agentmatch", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to ./agentmatch.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Minimum score an idle agent needs to be selected.
    #[arg(long, global = true)]
    pub min_score: Option<f64>,

    /// Enable debug logging of every score breakdown.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Roster file and target task shared by several subcommands.
#[derive(Debug, Args)]
pub struct TaskTarget {
    /// JSON or TOML file with `agents` and `tasks`.
    #[arg(long)]
    pub roster: PathBuf,

    /// Id of the task to match.
    #[arg(long)]
    pub task: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score every agent for a task, best first.
    Rank(TaskTarget),

    /// Select the best idle agent for a task.
    Best(TaskTarget),

    /// Explain how one agent scores for a task.
    Explain {
        #[command(flatten)]
        target: TaskTarget,

        /// Id of the agent to explain.
        #[arg(long)]
        agent: String,
    },

    /// Preview assignments for every pending task, highest priority first.
    Plan {
        /// JSON or TOML file with `agents` and `tasks`.
        #[arg(long)]
        roster: PathBuf,
    },

    /// Show the effective weights and threshold.
    Weights,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_rank_subcommand() {
        let cli = Cli::parse_from(["agentmatch", "rank", "--roster", "team.toml", "--task", "t-1"]);
        match cli.command {
            Command::Rank(target) => {
                assert_eq!(target.roster, PathBuf::from("team.toml"));
                assert_eq!(target.task, "t-1");
            }
            _ => panic!("expected Rank command"),
        }
    }

    #[test]
    fn cli_parses_explain_subcommand() {
        let cli = Cli::parse_from([
            "agentmatch",
            "explain",
            "--roster",
            "team.json",
            "--task",
            "t-1",
            "--agent",
            "fe-1",
        ]);
        match cli.command {
            Command::Explain { target, agent } => {
                assert_eq!(target.task, "t-1");
                assert_eq!(agent, "fe-1");
            }
            _ => panic!("expected Explain command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "agentmatch",
            "--config",
            "custom.toml",
            "--min-score",
            "0.4",
            "--verbose",
            "weights",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert_eq!(cli.min_score, Some(0.4));
        assert!(matches!(cli.command, Command::Weights));
    }

    #[test]
    fn cli_requires_task_for_best() {
        let result = Cli::try_parse_from(["agentmatch", "best", "--roster", "team.toml"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
