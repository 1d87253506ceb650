//! Welford running statistics and the outlier bounds derived from them.
//!
//! Each detection stage keeps one [`RunningStats`]. Values are folded in one
//! at a time; nothing is buffered, so memory stays constant for the lifetime
//! of a stream.

use serde::{Deserialize, Serialize};

use crate::{INITIAL_STD_DEV, STD_DEV_FLOOR};

/// Running count, mean and sum of squared deviations for one stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    sum_sq_dev: f64,
    std_dev: f64,
}

impl RunningStats {
    /// Empty accumulator. `std_dev` starts at [`INITIAL_STD_DEV`] until the
    /// first observation replaces it.
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            sum_sq_dev: 0.0,
            std_dev: INITIAL_STD_DEV,
        }
    }

    /// Number of values folded in.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running mean.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Running sum of squared deviations from the mean (Welford's `M2`).
    pub fn sum_sq_dev(&self) -> f64 {
        self.sum_sq_dev
    }

    /// Sample standard deviation, or [`STD_DEV_FLOOR`] after a single value.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Unbiased sample variance, once at least two values have been seen.
    pub fn variance(&self) -> Option<f64> {
        if self.count > 1 {
            Some(self.sum_sq_dev / (self.count - 1) as f64)
        } else {
            None
        }
    }

    /// Chebyshev bounds `mean ± k * std_dev`.
    pub fn bounds(&self, k: f64) -> OutlierBounds {
        let half_width = k * self.std_dev;
        OutlierBounds {
            low: self.mean - half_width,
            high: self.mean + half_width,
        }
    }

    /// Fold one value in with Welford's update.
    ///
    /// - count += 1
    /// - delta = value - mean
    /// - mean += delta / count
    /// - M2 += delta * (value - mean_new)
    pub(crate) fn observe(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.sum_sq_dev += delta * (value - self.mean);
        self.std_dev = match self.variance() {
            Some(var) => var.sqrt(),
            None => STD_DEV_FLOOR,
        };
    }
}

impl Default for RunningStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Which side of a pair of bounds a value falls on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundSide {
    Low,
    Inside,
    High,
}

/// Outlier detection values (ODVs): `[low, high]` around a running mean.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutlierBounds {
    pub low: f64,
    pub high: f64,
}

impl OutlierBounds {
    /// Inclusive membership test: `low <= value <= high`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    /// Strict classification: only values beyond a bound are `High`/`Low`.
    ///
    /// NaN compares false against both bounds and lands on `Inside`.
    pub fn classify(&self, value: f64) -> BoundSide {
        if value > self.high {
            BoundSide::High
        } else if value < self.low {
            BoundSide::Low
        } else {
            BoundSide::Inside
        }
    }
}
