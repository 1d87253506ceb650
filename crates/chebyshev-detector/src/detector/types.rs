//! Detector type definitions.
//!
//! Key types: `DetectorContext` (harness parameters), `ScoreBreakdown`
//! (per-call detail), `DetectorSnapshot` (read-only state view).

use serde::{Deserialize, Serialize};

use crate::stats::{BoundSide, OutlierBounds, RunningStats};

// ── Harness Context ─────────────────────────────────────────────────────

/// Generic parameters a harness hands every detector it constructs.
///
/// The Chebyshev detector accepts these but never lets them influence a
/// score; `data_set` only tags log events.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorContext {
    /// Name of the stream being evaluated.
    pub data_set: String,
    /// Leading records the harness treats as a warm-up.
    pub probationary_period: usize,
    /// Smallest value the harness expects on this stream.
    pub input_min: Option<f64>,
    /// Largest value the harness expects on this stream.
    pub input_max: Option<f64>,
}

impl DetectorContext {
    /// Create a context for a named stream.
    pub fn new(data_set: impl Into<String>) -> Self {
        Self {
            data_set: data_set.into(),
            ..Self::default()
        }
    }

    pub fn with_probationary_period(mut self, records: usize) -> Self {
        self.probationary_period = records;
        self
    }

    pub fn with_input_range(mut self, min: f64, max: f64) -> Self {
        self.input_min = Some(min);
        self.input_max = Some(max);
        self
    }
}

// ── Per-call Detail ─────────────────────────────────────────────────────

/// Everything one scoring call computed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// The anomaly score returned to callers.
    pub score: f64,
    /// Where the value fell relative to the stage-2 bounds.
    pub side: BoundSide,
    /// Stage-1 bounds after folding the value into stage 1.
    pub stage1: OutlierBounds,
    /// Stage-2 bounds used for scoring.
    pub stage2: OutlierBounds,
    /// Whether the value passed stage 1 and was folded into stage 2.
    pub stage2_updated: bool,
}

impl ScoreBreakdown {
    /// Whether the value landed outside the stage-2 bounds.
    pub fn is_outlier(&self) -> bool {
        self.side != BoundSide::Inside
    }
}

// ── State Snapshot ──────────────────────────────────────────────────────

/// Read-only copy of a detector's running state.
///
/// There is no way to load a snapshot back into a detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectorSnapshot {
    pub k1: f64,
    pub k2: f64,
    pub stage1: RunningStats,
    pub stage2: RunningStats,
}
