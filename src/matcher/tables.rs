//! Fixed lookup tables used by the scoring functions.
//!
//! [`MatchTables`] is built once per matcher and never mutated afterwards.

use std::collections::{HashMap, HashSet};

/// Near-synonymous capability tags. Groups are disjoint.
const SYNONYM_GROUPS: &[&[&str]] = &[
    &[
        "react",
        "frontend",
        "javascript",
        "typescript",
        "ui/ux",
        "vue",
        "angular",
        "svelte",
    ],
    &[
        "backend", "api", "server", "nodejs", "express", "rest", "graphql",
    ],
    &[
        "database",
        "sql",
        "postgresql",
        "mysql",
        "mongodb",
        "redis",
    ],
    &[
        "devops",
        "docker",
        "kubernetes",
        "ci/cd",
        "deployment",
        "infrastructure",
        "terraform",
    ],
    &["testing", "qa", "jest", "cypress", "unit-testing", "e2e"],
    &[
        "ai",
        "machine-learning",
        "ml",
        "llm",
        "nlp",
        "data-science",
    ],
    &[
        "mobile",
        "ios",
        "android",
        "react-native",
        "flutter",
        "swift",
        "kotlin",
    ],
];

/// Keyword sets for task type inference, in precedence order.
const TYPE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "frontend",
        &[
            "frontend", "react", "vue", "angular", "svelte", "ui", "ux", "ui/ux", "css", "html",
            "component", "layout", "styling",
        ],
    ),
    (
        "backend",
        &[
            "backend",
            "api",
            "server",
            "endpoint",
            "rest",
            "graphql",
            "microservice",
            "nodejs",
        ],
    ),
    (
        "mobile",
        &[
            "mobile",
            "ios",
            "android",
            "react-native",
            "flutter",
            "swift",
            "kotlin",
        ],
    ),
    (
        "devops",
        &[
            "devops",
            "deploy",
            "deployment",
            "docker",
            "kubernetes",
            "ci/cd",
            "pipeline",
            "infrastructure",
            "terraform",
        ],
    ),
    (
        "testing",
        &[
            "test", "tests", "testing", "qa", "e2e", "jest", "cypress", "coverage",
        ],
    ),
    (
        "ai",
        &[
            "ai",
            "ml",
            "machine-learning",
            "llm",
            "nlp",
            "embedding",
            "embeddings",
            "prompt",
        ],
    ),
    (
        "database",
        &[
            "database",
            "sql",
            "schema",
            "migration",
            "query",
            "postgresql",
            "postgres",
            "mysql",
            "mongodb",
        ],
    ),
];

/// Which inferred task types each declared agent type can take on.
const TYPE_COMPATIBILITY: &[(&str, &[&str])] = &[
    ("frontend", &["frontend"]),
    ("backend", &["backend", "database"]),
    ("fullstack", &["frontend", "backend", "fullstack"]),
    ("mobile", &["mobile"]),
    ("devops", &["devops"]),
    ("testing", &["testing"]),
    ("ai", &["ai"]),
    ("database", &["database"]),
];

#[derive(Debug)]
pub struct MatchTables {
    /// Normalized term → index into `groups`.
    synonym_index: HashMap<&'static str, usize>,
    type_keywords: Vec<(&'static str, HashSet<&'static str>)>,
    compatibility: HashMap<&'static str, HashSet<&'static str>>,
}

impl MatchTables {
    pub fn new() -> Self {
        let synonym_index = SYNONYM_GROUPS
            .iter()
            .enumerate()
            .flat_map(|(i, group)| group.iter().map(move |term| (*term, i)))
            .collect();

        let type_keywords = TYPE_KEYWORDS
            .iter()
            .map(|(kind, words)| (*kind, words.iter().copied().collect()))
            .collect();

        let compatibility = TYPE_COMPATIBILITY
            .iter()
            .map(|(agent_type, compatible)| (*agent_type, compatible.iter().copied().collect()))
            .collect();

        Self {
            synonym_index,
            type_keywords,
            compatibility,
        }
    }

    /// Whether two case-folded capability tags belong to the same synonym group.
    pub fn are_synonyms(&self, a: &str, b: &str) -> bool {
        match (self.synonym_index.get(a), self.synonym_index.get(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// First task type whose keyword set intersects `tokens`.
    pub fn infer_type(&self, tokens: &HashSet<String>) -> Option<&'static str> {
        self.type_keywords
            .iter()
            .find(|(_, words)| tokens.iter().any(|t| words.contains(t.as_str())))
            .map(|(kind, _)| *kind)
    }

    /// Whether an agent of `agent_type` can take a task of `task_type`.
    /// Types missing from the table are only compatible with themselves.
    pub fn is_compatible(&self, agent_type: &str, task_type: &str) -> bool {
        match self.compatibility.get(agent_type) {
            Some(compatible) => compatible.contains(task_type),
            None => agent_type == task_type,
        }
    }
}

impl Default for MatchTables {
    fn default() -> Self {
        Self::new()
    }
}
