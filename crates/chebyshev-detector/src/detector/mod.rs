//! Streaming anomaly detectors and the harness-facing trait.
//!
//! ## Architecture
//!
//! ```text
//!   value ──► stage 1 (Welford, k1) ──► inside [low1, high1]? ──► stage 2 (Welford, k2)
//!                                                                     │
//!                                         score against [low2, high2] ◄┘
//! ```
//!
//! Stage 2 only learns from values stage 1 accepted, so a spike cannot
//! inflate the boundary it is scored against.

pub mod chebyshev;
pub mod types;

pub use chebyshev::ChebyshevDetector;
pub use types::{DetectorContext, DetectorSnapshot, ScoreBreakdown};

use crate::record::{DetectorOutput, InputRecord};

/// A stateful per-stream scoring strategy a harness can drive.
///
/// The harness constructs one detector per stream and calls
/// `handle_record` once per record, in order.
pub trait AnomalyDetector {
    /// Score the next record.
    fn handle_record(&mut self, record: &InputRecord) -> DetectorOutput;

    /// Name of this detector (for run summaries and logs).
    fn name(&self) -> &str;
}
