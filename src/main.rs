use std::process::ExitCode;

use agentmatch::cli::{Cli, Command};
use agentmatch::planner::plan_assignments;
use agentmatch::ui::Printer;
use agentmatch::{AppConfig, CapabilityMatcher, Roster};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("agentmatch=debug")
        } else {
            EnvFilter::new("agentmatch=info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_roster(path: &std::path::Path) -> Result<Roster> {
    Roster::load(path).with_context(|| format!("failed to load roster {}", path.display()))
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::load()?,
    };
    if let Some(min) = cli.min_score {
        config.matcher.min_score = Some(min);
    }

    let matcher = CapabilityMatcher::from_config(&config.matcher)?;
    let printer = Printer::new();

    match cli.command {
        Command::Rank(target) => {
            let roster = load_roster(&target.roster)?;
            let task = roster.task(&target.task)?;
            let ranked = matcher.rank_agents(&roster.agents, task);
            printer.print_ranking(task, &ranked);
        }
        Command::Best(target) => {
            let roster = load_roster(&target.roster)?;
            let task = roster.task(&target.task)?;
            let best = matcher
                .find_best_agent(&roster.agents, task)
                .map(|agent| (agent, matcher.get_match_explanation(agent, task)));
            printer.print_best(task, best);
        }
        Command::Explain { target, agent } => {
            let roster = load_roster(&target.roster)?;
            let task = roster.task(&target.task)?;
            let agent = roster.agent(&agent)?;
            let scored = matcher.score_agent_with_breakdown(agent, task);
            let text = matcher.get_match_explanation(agent, task);
            printer.print_explanation(agent, task, &scored, &text);
        }
        Command::Plan { roster } => {
            let roster = load_roster(&roster)?;
            let plan = plan_assignments(&matcher, &roster.agents, &roster.tasks);
            printer.print_plan(&plan);
        }
        Command::Weights => {
            printer.print_weights(&matcher.get_weights(), matcher.min_score());
        }
    }

    Ok(())
}
