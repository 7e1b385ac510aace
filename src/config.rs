//! Matcher configuration loaded from `agentmatch.toml`, plus an in-process
//! configuration source that the matcher can subscribe to.
//!
//! Keys follow the `matcher.weights.<name>` / `matcher.minScore` layout. Values
//! missing from the file leave the matcher defaults in place. The environment
//! variable `AGENTMATCH_MIN_SCORE` takes precedence over the file for the
//! threshold.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::warn;

use crate::error::{MatchError, Result};
use crate::matcher::WeightUpdate;

pub const CONFIG_FILE: &str = "agentmatch.toml";
pub const MIN_SCORE_ENV: &str = "AGENTMATCH_MIN_SCORE";

pub const KEY_CAPABILITY_MATCH: &str = "matcher.weights.capabilityMatch";
pub const KEY_SPECIALIZATION_MATCH: &str = "matcher.weights.specializationMatch";
pub const KEY_TYPE_MATCH: &str = "matcher.weights.typeMatch";
pub const KEY_WORKLOAD_FACTOR: &str = "matcher.weights.workloadFactor";
pub const KEY_PERFORMANCE_FACTOR: &str = "matcher.weights.performanceFactor";
pub const KEY_MIN_SCORE: &str = "matcher.minScore";

/// Every key a [`ConfigSource`] accepts.
pub const KEYS: [&str; 6] = [
    KEY_CAPABILITY_MATCH,
    KEY_SPECIALIZATION_MATCH,
    KEY_TYPE_MATCH,
    KEY_WORKLOAD_FACTOR,
    KEY_PERFORMANCE_FACTOR,
    KEY_MIN_SCORE,
];

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// The `[matcher]` table.
    #[serde(default)]
    pub matcher: MatcherConfig,
}

/// Optional overrides for the matcher. `None` means "keep the default".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatcherConfig {
    /// Per-signal weight overrides (`[matcher.weights]`).
    #[serde(default)]
    pub weights: WeightUpdate,
    /// Minimum total score for `find_best_agent` to return an agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
}

impl MatcherConfig {
    fn slot_mut(&mut self, key: &str) -> Option<&mut Option<f64>> {
        match key {
            KEY_CAPABILITY_MATCH => Some(&mut self.weights.capability_match),
            KEY_SPECIALIZATION_MATCH => Some(&mut self.weights.specialization_match),
            KEY_TYPE_MATCH => Some(&mut self.weights.type_match),
            KEY_WORKLOAD_FACTOR => Some(&mut self.weights.workload_factor),
            KEY_PERFORMANCE_FACTOR => Some(&mut self.weights.performance_factor),
            KEY_MIN_SCORE => Some(&mut self.min_score),
            _ => None,
        }
    }

    /// Reject NaN and infinite weights or threshold.
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        match self.min_score {
            Some(value) if !value.is_finite() => Err(MatchError::InvalidValue {
                key: KEY_MIN_SCORE.to_string(),
                value,
            }),
            _ => Ok(()),
        }
    }

    /// Value currently set for `key`, if the key is known and set.
    pub fn get(&self, key: &str) -> Result<Option<f64>> {
        let value = match key {
            KEY_CAPABILITY_MATCH => self.weights.capability_match,
            KEY_SPECIALIZATION_MATCH => self.weights.specialization_match,
            KEY_TYPE_MATCH => self.weights.type_match,
            KEY_WORKLOAD_FACTOR => self.weights.workload_factor,
            KEY_PERFORMANCE_FACTOR => self.weights.performance_factor,
            KEY_MIN_SCORE => self.min_score,
            _ => return Err(MatchError::UnknownConfigKey(key.to_string())),
        };
        Ok(value)
    }
}

impl AppConfig {
    /// Load `agentmatch.toml` from the working directory, falling back to
    /// defaults when it does not exist.
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        let config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };
        Ok(config.with_env_overrides())
    }

    /// Load an explicit configuration file. Unlike [`load`](Self::load), a
    /// missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(Self::from_file(path)?.with_env_overrides())
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str::<AppConfig>(&contents)?;
        config.matcher.validate()?;
        Ok(config)
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(raw) = std::env::var(MIN_SCORE_ENV)
            && !raw.is_empty()
        {
            match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => self.matcher.min_score = Some(v),
                _ => warn!(value = %raw, "Ignoring invalid AGENTMATCH_MIN_SCORE"),
            }
        }
        self
    }
}

/// Watchable holder of the current [`MatcherConfig`].
///
/// Subscribers receive a notification whenever a key actually changes value.
#[derive(Debug)]
pub struct ConfigSource {
    tx: watch::Sender<MatcherConfig>,
}

impl Default for ConfigSource {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}

impl ConfigSource {
    pub fn new(initial: MatcherConfig) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn snapshot(&self) -> MatcherConfig {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MatcherConfig> {
        self.tx.subscribe()
    }

    /// Set one key, e.g. `matcher.weights.typeMatch`.
    pub fn set(&self, key: &str, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(MatchError::InvalidValue {
                key: key.to_string(),
                value,
            });
        }
        self.update(key, Some(value))
    }

    /// Remove the override for one key. Subscribed matchers keep their
    /// current value for it.
    pub fn clear(&self, key: &str) -> Result<()> {
        self.update(key, None)
    }

    /// Replace the whole configuration record. A record with a non-finite
    /// value is rejected and the current one kept.
    pub fn replace(&self, config: MatcherConfig) -> Result<()> {
        config.validate()?;
        self.tx.send_if_modified(|current| {
            if *current == config {
                false
            } else {
                *current = config;
                true
            }
        });
        Ok(())
    }

    fn update(&self, key: &str, value: Option<f64>) -> Result<()> {
        if !KEYS.contains(&key) {
            return Err(MatchError::UnknownConfigKey(key.to_string()));
        }
        self.tx.send_if_modified(|config| match config.slot_mut(key) {
            Some(slot) if *slot != value => {
                *slot = value;
                true
            }
            _ => false,
        });
        Ok(())
    }
}
