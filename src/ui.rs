//! Terminal output for match results.
//!
//! Uses `console` for coloured output: green for strong scores, yellow for
//! middling ones, red for poor ones and for missing matches.

use console::Style;

use crate::matcher::{MatchWeights, RankedAgent, ScoredMatch};
use crate::model::{Agent, Task};
use crate::planner::PlannedAssignment;

const STRONG_SCORE: f64 = 0.7;
const WEAK_SCORE: f64 = 0.4;

/// Styled writer for the CLI's stdout reports.
pub struct Printer {
    /// Strong scores and successful picks.
    green: Style,
    /// Middling scores and unassigned-task notes.
    yellow: Style,
    /// Poor scores and missing matches.
    red: Style,
    /// Secondary details such as titles and statuses.
    dim: Style,
    /// Headings and labels.
    bold: Style,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            green: Style::new().green().bold(),
            yellow: Style::new().yellow(),
            red: Style::new().red().bold(),
            dim: Style::new().dim(),
            bold: Style::new().bold(),
        }
    }

    fn score_style(&self, score: f64) -> &Style {
        if score >= STRONG_SCORE {
            &self.green
        } else if score >= WEAK_SCORE {
            &self.yellow
        } else {
            &self.red
        }
    }

    fn header(&self, task: &Task) {
        println!(
            "{} {} {}",
            self.bold.apply_to("Task"),
            task.id,
            self.dim.apply_to(&task.title)
        );
    }

    pub fn print_ranking(&self, task: &Task, ranked: &[RankedAgent<'_>]) {
        self.header(task);
        for (i, entry) in ranked.iter().enumerate() {
            println!(
                "  {:>2}. {:<20} {} {}",
                i + 1,
                entry.agent.id,
                self.score_style(entry.score)
                    .apply_to(format!("{:.3}", entry.score)),
                self.dim.apply_to(entry.agent.status)
            );
        }
    }

    pub fn print_best(&self, task: &Task, best: Option<(&Agent, String)>) {
        self.header(task);
        match best {
            Some((agent, explanation)) => {
                println!("  {} {}", self.green.apply_to("✓"), agent.id);
                println!("    {explanation}");
            }
            None => {
                println!("  {} No suitable agent found", self.red.apply_to("✗"));
            }
        }
    }

    pub fn print_explanation(&self, agent: &Agent, task: &Task, scored: &ScoredMatch, text: &str) {
        self.header(task);
        println!("  {} {}", self.bold.apply_to("Agent"), agent.id);
        println!("    {text}");
        let b = &scored.breakdown;
        for (label, value) in [
            ("capability", b.capability_match),
            ("specialization", b.specialization_match),
            ("type", b.type_match),
            ("workload", b.workload_factor),
            ("performance", b.performance_factor),
        ] {
            println!("    {:<15} {:>6.2}", self.dim.apply_to(label), value);
        }
        println!(
            "    {:<15} {}",
            self.bold.apply_to("total"),
            self.score_style(scored.score)
                .apply_to(format!("{:>6.3}", scored.score))
        );
    }

    pub fn print_plan(&self, plan: &[PlannedAssignment]) {
        if plan.is_empty() {
            println!("  {}", self.dim.apply_to("No pending tasks"));
            return;
        }
        for row in plan {
            match &row.agent_id {
                Some(agent_id) => println!(
                    "  {} [{:>3}] {:<20} → {} {}",
                    self.green.apply_to("✓"),
                    row.priority,
                    row.task_id,
                    agent_id,
                    self.score_style(row.score)
                        .apply_to(format!("{:.3}", row.score))
                ),
                None => println!(
                    "  {} [{:>3}] {:<20} {}",
                    self.red.apply_to("✗"),
                    row.priority,
                    row.task_id,
                    self.yellow.apply_to(&row.explanation)
                ),
            }
        }
    }

    pub fn print_weights(&self, weights: &MatchWeights, min_score: f64) {
        println!("{}", self.bold.apply_to("─── Matcher Weights ───"));
        println!(
            "{}",
            serde_json::to_string_pretty(weights).unwrap_or_default()
        );
        println!("{} {min_score}", self.bold.apply_to("minScore:"));
    }
}
