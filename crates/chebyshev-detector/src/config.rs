//! Detector configuration: the two Chebyshev tail probabilities.

use serde::{Deserialize, Serialize};

use crate::error::{DetectorError, DetectorResult};

/// Tail probabilities for the two detection stages.
///
/// Chebyshev's inequality bounds `P(|X - mean| >= k * std) <= 1 / k^2`, so a
/// tail probability `p` maps to the multiplier `k = 1 / sqrt(p)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Loose filter deciding which values may shape stage 2. Default: 0.1.
    pub stage1_probability: f64,
    /// Reported anomaly boundary. Default: 0.001.
    pub stage2_probability: f64,
}

impl DetectorConfig {
    /// Check that both probabilities are finite and in `(0, 1]`.
    pub fn validate(&self) -> DetectorResult<()> {
        check_probability("stage1", self.stage1_probability)?;
        check_probability("stage2", self.stage2_probability)?;
        Ok(())
    }

    /// Stage-1 multiplier `k1 = 1 / sqrt(p1)`.
    pub fn stage1_multiplier(&self) -> f64 {
        chebyshev_multiplier(self.stage1_probability)
    }

    /// Stage-2 multiplier `k2 = 1 / sqrt(p2)`.
    pub fn stage2_multiplier(&self) -> f64 {
        chebyshev_multiplier(self.stage2_probability)
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            stage1_probability: crate::DEFAULT_STAGE1_PROBABILITY,
            stage2_probability: crate::DEFAULT_STAGE2_PROBABILITY,
        }
    }
}

/// Convert a tail probability into a standard-deviation multiplier.
pub fn chebyshev_multiplier(probability: f64) -> f64 {
    1.0 / probability.sqrt()
}

fn check_probability(stage: &'static str, value: f64) -> DetectorResult<()> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(DetectorError::InvalidProbability { stage, value })
    }
}
