//! Two-stage Chebyshev outlier scoring.
//!
//! Stage 1 is a loose filter: every value updates it, and only values inside
//! its bounds are allowed to shape stage 2. Stage 2 is the tight estimate the
//! reported score is measured against, so isolated spikes do not widen the
//! boundary they are judged by.

use tracing::{debug, trace, warn};

use crate::config::DetectorConfig;
use crate::error::DetectorResult;
use crate::record::{DetectorOutput, InputRecord};
use crate::stats::{BoundSide, RunningStats};

use super::types::{DetectorContext, DetectorSnapshot, ScoreBreakdown};
use super::AnomalyDetector;

/// Streaming outlier scorer over two nested Welford estimators.
///
/// One instance per stream. Scoring takes `&mut self`, so calls on a given
/// instance are serialized by construction.
#[derive(Clone, Debug)]
pub struct ChebyshevDetector {
    config: DetectorConfig,
    /// Stage-1 multiplier `1 / sqrt(p1)`.
    k1: f64,
    /// Stage-2 multiplier `1 / sqrt(p2)`.
    k2: f64,
    stage1: RunningStats,
    stage2: RunningStats,
    context: DetectorContext,
}

impl ChebyshevDetector {
    /// Detector with the default tail probabilities (0.1 and 0.001).
    pub fn new() -> Self {
        Self::build(DetectorConfig::default(), DetectorContext::default())
    }

    /// Detector with explicit tail probabilities.
    pub fn with_config(config: DetectorConfig) -> DetectorResult<Self> {
        Self::from_context(DetectorContext::default(), config)
    }

    /// Detector constructed by a harness. The context only tags log events.
    pub fn from_context(context: DetectorContext, config: DetectorConfig) -> DetectorResult<Self> {
        config.validate()?;
        Ok(Self::build(config, context))
    }

    fn build(config: DetectorConfig, context: DetectorContext) -> Self {
        Self {
            k1: config.stage1_multiplier(),
            k2: config.stage2_multiplier(),
            config,
            stage1: RunningStats::new(),
            stage2: RunningStats::new(),
            context,
        }
    }

    /// Score the next value in the stream.
    pub fn score(&mut self, value: f64) -> f64 {
        self.score_detailed(value).score
    }

    /// Score the next value and report the bounds that produced the score.
    ///
    /// 1. Fold `value` into stage 1 and derive its bounds.
    /// 2. If `value` is inside them (inclusive), fold it into stage 2.
    /// 3. Derive stage-2 bounds from whatever stage 2 now holds.
    /// 4. Above the high bound: `(value - high) / value`. Below the low
    ///    bound: `|(low - value) / low|`. Otherwise `0.0`.
    ///
    /// Zero denominators and non-finite input are not guarded: they yield
    /// infinite or NaN scores, or silently corrupt the running statistics.
    pub fn score_detailed(&mut self, value: f64) -> ScoreBreakdown {
        if !value.is_finite() {
            warn!(
                data_set = %self.context.data_set,
                value,
                "non-finite input folded into running statistics"
            );
        }

        self.stage1.observe(value);
        let stage1 = self.stage1.bounds(self.k1);

        let stage2_updated = stage1.contains(value);
        if stage2_updated {
            self.stage2.observe(value);
        } else {
            trace!(
                data_set = %self.context.data_set,
                value,
                low = stage1.low,
                high = stage1.high,
                "value outside stage-1 bounds, stage 2 left untouched"
            );
        }

        let stage2 = self.stage2.bounds(self.k2);
        let side = stage2.classify(value);
        let score = match side {
            BoundSide::High => (value - stage2.high) / value,
            BoundSide::Low => ((stage2.low - value) / stage2.low).abs(),
            BoundSide::Inside => 0.0,
        };

        let breakdown = ScoreBreakdown {
            score,
            side,
            stage1,
            stage2,
            stage2_updated,
        };

        if breakdown.is_outlier() {
            debug!(
                data_set = %self.context.data_set,
                value,
                score,
                low = stage2.low,
                high = stage2.high,
                record = self.stage1.count(),
                "value outside stage-2 bounds"
            );
        }

        breakdown
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn context(&self) -> &DetectorContext {
        &self.context
    }

    pub fn k1(&self) -> f64 {
        self.k1
    }

    pub fn k2(&self) -> f64 {
        self.k2
    }

    /// Stage-1 running statistics (every value).
    pub fn stage1(&self) -> &RunningStats {
        &self.stage1
    }

    /// Stage-2 running statistics (values that passed stage 1).
    pub fn stage2(&self) -> &RunningStats {
        &self.stage2
    }

    /// Read-only copy of the current running state.
    pub fn snapshot(&self) -> DetectorSnapshot {
        DetectorSnapshot {
            k1: self.k1,
            k2: self.k2,
            stage1: self.stage1.clone(),
            stage2: self.stage2.clone(),
        }
    }
}

impl Default for ChebyshevDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl AnomalyDetector for ChebyshevDetector {
    fn handle_record(&mut self, record: &InputRecord) -> DetectorOutput {
        DetectorOutput::new(self.score(record.value))
    }

    fn name(&self) -> &str {
        "chebyshev"
    }
}
