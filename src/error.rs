use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Unknown config key: {0}")]
    UnknownConfigKey(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: f64 },

    #[error("Config subscription requires a running Tokio runtime")]
    NoRuntime,

    #[error("Unsupported roster format: {0} (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_display() {
        let err = MatchError::UnknownConfigKey("matcher.weights.speed".into());
        assert_eq!(err.to_string(), "Unknown config key: matcher.weights.speed");
    }

    #[test]
    fn invalid_value_display() {
        let err = MatchError::InvalidValue {
            key: "matcher.minScore".into(),
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "Invalid value for matcher.minScore: NaN");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MatchError>();
    }
}
