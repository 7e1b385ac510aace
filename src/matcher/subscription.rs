//! Live reload of matcher settings from a [`ConfigSource`](crate::config::ConfigSource).

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use super::CapabilityMatcher;
use crate::config::MatcherConfig;
use crate::error::{MatchError, Result};

/// Registration of a matcher on a configuration source.
///
/// The listener task is aborted when this value is dropped or cancelled. It
/// also ends on its own once the source goes away.
#[derive(Debug)]
pub struct ConfigSubscription {
    handle: Option<JoinHandle<()>>,
}

impl ConfigSubscription {
    /// Release the listener now.
    pub fn cancel(mut self) {
        self.release();
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Released config subscription");
        }
    }
}

impl Drop for ConfigSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl CapabilityMatcher {
    /// Apply the current configuration and keep reloading weight and threshold
    /// keys as they change.
    ///
    /// Only keys whose value changed are applied, so a key that stays put does
    /// not overwrite a later [`update_weights`](Self::update_weights) call.
    /// Must be called from within a Tokio runtime.
    pub fn watch_config(
        &self,
        mut rx: watch::Receiver<MatcherConfig>,
    ) -> Result<ConfigSubscription> {
        let runtime = Handle::try_current().map_err(|_| MatchError::NoRuntime)?;

        let initial = rx.borrow_and_update().clone();
        self.apply_config_change(&MatcherConfig::default(), &initial);

        let matcher = self.clone();
        let handle = runtime.spawn(async move {
            let mut last = initial;
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                matcher.apply_config_change(&last, &next);
                last = next;
            }
            debug!("Config source closed, stopping listener");
        });

        Ok(ConfigSubscription {
            handle: Some(handle),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::ConfigSource;
    use crate::matcher::WeightUpdate;
    use crate::model::{Agent, Task};

    async fn eventually(mut check: impl FnMut() -> bool) -> bool {
        for _ in 0..100 {
            if check() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        check()
    }

    #[tokio::test]
    async fn initial_config_is_applied_immediately() {
        let source = ConfigSource::new(MatcherConfig {
            weights: WeightUpdate {
                type_match: Some(0.3),
                ..Default::default()
            },
            min_score: Some(0.1),
        });
        let matcher = CapabilityMatcher::new();
        let _sub = matcher.watch_config(source.subscribe()).unwrap();

        assert_eq!(matcher.get_weights().type_match, 0.3);
        assert_eq!(matcher.min_score(), 0.1);
    }

    #[tokio::test]
    async fn key_change_is_reloaded() {
        let source = ConfigSource::default();
        let matcher = CapabilityMatcher::new();
        let sub = matcher.watch_config(source.subscribe()).unwrap();
        assert!(sub.is_active());

        source.set("matcher.weights.typeMatch", 0.5).unwrap();
        source.set("matcher.minScore", 0.25).unwrap();

        assert!(eventually(|| matcher.get_weights().type_match == 0.5).await);
        assert!(eventually(|| matcher.min_score() == 0.25).await);
        assert_eq!(matcher.get_weights().capability_match, 0.40);
    }

    #[tokio::test]
    async fn unchanged_keys_do_not_clobber_manual_updates() {
        let source = ConfigSource::new(MatcherConfig {
            weights: WeightUpdate {
                type_match: Some(0.3),
                ..Default::default()
            },
            min_score: None,
        });
        let matcher = CapabilityMatcher::new();
        let _sub = matcher.watch_config(source.subscribe()).unwrap();

        matcher
            .update_weights(WeightUpdate {
                type_match: Some(0.9),
                ..Default::default()
            })
            .unwrap();
        source.set("matcher.weights.capabilityMatch", 0.6).unwrap();

        assert!(eventually(|| matcher.get_weights().capability_match == 0.6).await);
        assert_eq!(matcher.get_weights().type_match, 0.9);
    }

    #[tokio::test]
    async fn non_finite_initial_config_is_ignored() {
        let source = ConfigSource::new(MatcherConfig {
            weights: WeightUpdate {
                capability_match: Some(f64::NAN),
                ..Default::default()
            },
            min_score: None,
        });
        let matcher = CapabilityMatcher::new();
        let _sub = matcher.watch_config(source.subscribe()).unwrap();

        assert_eq!(matcher.get_weights().capability_match, 0.40);
        let score = matcher.score_agent(&Agent::new(None), &Task::new("t", ""));
        assert_eq!(score, 0.0);

        source.set("matcher.weights.typeMatch", 0.3).unwrap();
        assert!(eventually(|| matcher.get_weights().type_match == 0.3).await);
    }

    #[tokio::test]
    async fn dropping_subscription_stops_reloads() {
        let source = ConfigSource::default();
        let matcher = CapabilityMatcher::new();
        let sub = matcher.watch_config(source.subscribe()).unwrap();
        drop(sub);
        tokio::task::yield_now().await;

        source.set("matcher.weights.workloadFactor", 0.7).unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(matcher.get_weights().workload_factor, 0.10);
    }

    #[tokio::test]
    async fn cancel_releases_listener() {
        let source = ConfigSource::default();
        let matcher = CapabilityMatcher::new();
        let sub = matcher.watch_config(source.subscribe()).unwrap();
        sub.cancel();

        source.set("matcher.weights.performanceFactor", 0.2).unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(matcher.get_weights().performance_factor, 0.05);
    }

    #[tokio::test]
    async fn listener_ends_when_source_is_dropped() {
        let source = ConfigSource::default();
        let matcher = CapabilityMatcher::new();
        let sub = matcher.watch_config(source.subscribe()).unwrap();
        drop(source);

        let finished = eventually(|| !sub.is_active()).await;
        assert!(finished);
    }

    #[test]
    fn watch_without_runtime_fails() {
        let source = ConfigSource::default();
        let matcher = CapabilityMatcher::new();
        let err = matcher.watch_config(source.subscribe()).unwrap_err();
        assert!(matches!(err, MatchError::NoRuntime));
    }
}
