use serde::{Deserialize, Serialize};

use super::scoring::ScoreBreakdown;
use crate::config::{
    KEY_CAPABILITY_MATCH, KEY_PERFORMANCE_FACTOR, KEY_SPECIALIZATION_MATCH, KEY_TYPE_MATCH,
    KEY_WORKLOAD_FACTOR,
};
use crate::error::{MatchError, Result};

/// Weights applied to each sub-score. They are not normalized; the weighted sum
/// is clamped instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchWeights {
    pub capability_match: f64,
    pub specialization_match: f64,
    pub type_match: f64,
    pub workload_factor: f64,
    pub performance_factor: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            capability_match: 0.40,
            specialization_match: 0.25,
            type_match: 0.20,
            workload_factor: 0.10,
            performance_factor: 0.05,
        }
    }
}

impl MatchWeights {
    /// Weighted sum of `breakdown`, clamped to `[0, 1]`. A NaN sum scores 0.
    pub fn combine(&self, breakdown: &ScoreBreakdown) -> f64 {
        let total = breakdown.capability_match * self.capability_match
            + breakdown.specialization_match * self.specialization_match
            + breakdown.type_match * self.type_match
            + breakdown.workload_factor * self.workload_factor
            + breakdown.performance_factor * self.performance_factor;
        if total.is_nan() {
            return 0.0;
        }
        total.clamp(0.0, 1.0)
    }

    /// Overwrite the fields set in `update`, leaving the rest untouched.
    pub fn merge(&mut self, update: &WeightUpdate) {
        if let Some(w) = update.capability_match {
            self.capability_match = w;
        }
        if let Some(w) = update.specialization_match {
            self.specialization_match = w;
        }
        if let Some(w) = update.type_match {
            self.type_match = w;
        }
        if let Some(w) = update.workload_factor {
            self.workload_factor = w;
        }
        if let Some(w) = update.performance_factor {
            self.performance_factor = w;
        }
    }
}

/// Bitwise equality, so an unchanged NaN is not reported as a change.
pub(crate) fn same_value(a: Option<f64>, b: Option<f64>) -> bool {
    a.map(f64::to_bits) == b.map(f64::to_bits)
}

/// A partial set of weights. Used both for `update_weights` and as the
/// `[matcher.weights]` section of the configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capability_match: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization_match: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_match: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workload_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_factor: Option<f64>,
}

impl WeightUpdate {
    /// Fields of `next` that differ from `self` and are set in `next`.
    pub fn changed_in(&self, next: &WeightUpdate) -> WeightUpdate {
        fn pick(prev: Option<f64>, next: Option<f64>) -> Option<f64> {
            if same_value(prev, next) { None } else { next }
        }
        WeightUpdate {
            capability_match: pick(self.capability_match, next.capability_match),
            specialization_match: pick(self.specialization_match, next.specialization_match),
            type_match: pick(self.type_match, next.type_match),
            workload_factor: pick(self.workload_factor, next.workload_factor),
            performance_factor: pick(self.performance_factor, next.performance_factor),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == WeightUpdate::default()
    }

    /// Reject NaN and infinite weights, naming the offending config key.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            (KEY_CAPABILITY_MATCH, self.capability_match),
            (KEY_SPECIALIZATION_MATCH, self.specialization_match),
            (KEY_TYPE_MATCH, self.type_match),
            (KEY_WORKLOAD_FACTOR, self.workload_factor),
            (KEY_PERFORMANCE_FACTOR, self.performance_factor),
        ];
        for (key, value) in fields {
            if let Some(value) = value
                && !value.is_finite()
            {
                return Err(MatchError::InvalidValue {
                    key: key.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}
