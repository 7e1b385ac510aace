use super::scoring::{BUSY_WORKLOAD_FACTOR, ScoreBreakdown};
use crate::model::{Agent, Task};

/// Capability fractions above this read as strong.
const STRONG_CAPABILITY: f64 = 0.7;
/// Capability fractions above this (and up to strong) read as partial.
const PARTIAL_CAPABILITY: f64 = 0.3;

fn pct(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

/// Render a breakdown as a short list of qualitative labels.
pub fn render(agent: &Agent, task: &Task, breakdown: &ScoreBreakdown, score: f64) -> String {
    let Some(template) = &agent.template else {
        return format!("Score {}%: No template assigned", pct(score));
    };

    let mut parts = Vec::new();

    let cap = breakdown.capability_match;
    parts.push(if task.required_capabilities.is_empty() {
        "No capabilities required".to_string()
    } else if cap > STRONG_CAPABILITY {
        format!("Strong capability match ({}%)", pct(cap))
    } else if cap > PARTIAL_CAPABILITY {
        format!("Partial capability match ({}%)", pct(cap))
    } else if cap > 0.0 {
        format!("Weak capability match ({}%)", pct(cap))
    } else {
        "No capability overlap".to_string()
    });

    let spec = breakdown.specialization_match;
    if spec >= 0.5 {
        parts.push(format!("Good specialization fit ({}%)", pct(spec)));
    } else if spec > 0.0 {
        parts.push(format!("Some specialization overlap ({}%)", pct(spec)));
    } else if spec < 0.0 {
        parts.push("Specialization mismatch".to_string());
    } else if template.specialization.is_none() {
        parts.push("No specialization declared".to_string());
    }

    let ty = breakdown.type_match;
    parts.push(if ty > 0.0 {
        format!("Type match ({})", template.agent_type)
    } else if ty < 0.0 {
        "Type mismatch".to_string()
    } else {
        "Task type unclear".to_string()
    });

    parts.push(if breakdown.workload_factor <= BUSY_WORKLOAD_FACTOR {
        "Agent is busy".to_string()
    } else {
        "Agent is available".to_string()
    });

    parts.push(match agent.tasks_completed {
        0 => "New agent (no completed tasks)".to_string(),
        1 => "1 task completed".to_string(),
        n if breakdown.performance_factor >= 1.0 => format!("Experienced ({n} tasks completed)"),
        n => format!("{n} tasks completed"),
    });

    format!("Score {}%: {}", pct(score), parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Template;

    fn agent() -> Agent {
        Agent::new(Some(
            Template::new("frontend")
                .with_specialization("React, CSS")
                .with_capabilities(["react", "css"]),
        ))
    }

    #[test]
    fn renders_strong_match() {
        let mut agent = agent();
        agent.tasks_completed = 12;
        let task = Task::new("t", "d").with_required_capabilities(["react"]);
        let breakdown = ScoreBreakdown {
            capability_match: 1.0,
            specialization_match: 0.5,
            type_match: 1.0,
            workload_factor: 1.0,
            performance_factor: 1.0,
        };
        let text = render(&agent, &task, &breakdown, 0.875);
        assert_eq!(
            text,
            "Score 88%: Strong capability match (100%), Good specialization fit (50%), \
             Type match (frontend), Agent is available, Experienced (12 tasks completed)"
        );
    }

    #[test]
    fn capability_bands() {
        let task = Task::new("t", "d").with_required_capabilities(["react"]);
        let label = |cap: f64| {
            let breakdown = ScoreBreakdown {
                capability_match: cap,
                ..Default::default()
            };
            render(&agent(), &task, &breakdown, 0.0)
        };
        // 8 of 11 required capabilities.
        assert!(label(8.0 / 11.0).contains("Strong capability match (73%)"));
        assert!(label(0.7).contains("Partial capability match (70%)"));
        assert!(label(0.5).contains("Partial capability match (50%)"));
        assert!(label(0.3).contains("Weak capability match (30%)"));
        assert!(label(0.1).contains("Weak capability match (10%)"));
    }

    #[test]
    fn renders_penalties_and_busy() {
        let mut agent = agent();
        agent.current_task = Some("t-0".into());
        let task = Task::new("t", "d").with_required_capabilities(["kubernetes"]);
        let breakdown = ScoreBreakdown {
            capability_match: -0.2,
            specialization_match: -0.1,
            type_match: -0.2,
            workload_factor: BUSY_WORKLOAD_FACTOR,
            performance_factor: 0.5,
        };
        let text = render(&agent, &task, &breakdown, 0.0);
        assert!(text.starts_with("Score 0%:"));
        assert!(text.contains("No capability overlap"));
        assert!(text.contains("Specialization mismatch"));
        assert!(text.contains("Type mismatch"));
        assert!(text.contains("Agent is busy"));
        assert!(text.contains("New agent"));
    }

    #[test]
    fn renders_missing_template() {
        let agent = Agent::new(None);
        let task = Task::new("t", "d");
        let text = render(&agent, &task, &ScoreBreakdown::default(), 0.0);
        assert_eq!(text, "Score 0%: No template assigned");
    }
}
