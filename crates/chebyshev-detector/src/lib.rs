//! # chebyshev-detector
//!
//! Streaming anomaly scoring for scalar time series.
//!
//! Each incoming value is folded into two nested Welford estimators and scored
//! against Chebyshev outlier bounds. No distribution shape is assumed and no
//! past values are stored.
//!
//! ## Architecture
//!
//! ```text
//!   InputRecord ──► DetectorRun ──► ChebyshevDetector ──► ScoredRecord
//!                      │                 │
//!                      │                 ├── stage 1: RunningStats, k1 = 1/sqrt(p1)
//!                      │                 └── stage 2: RunningStats, k2 = 1/sqrt(p2)
//!                      └── RunSummary
//! ```
//!
//! ## Scoring
//!
//! - Value above the stage-2 high bound: `(value - high) / value`
//! - Value below the stage-2 low bound: `|(low - value) / low|`
//! - Otherwise: `0.0`
//!
//! Zero denominators are not guarded and yield infinite scores. Non-finite
//! input silently corrupts the running statistics.
//!
//! ## Quick Start
//!
//! ```rust
//! use chebyshev_detector::ChebyshevDetector;
//!
//! let mut detector = ChebyshevDetector::new();
//! for _ in 0..50 {
//!     assert_eq!(detector.score(10.0), 0.0);
//! }
//! assert!(detector.score(1_000.0) > 0.9);
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod detector;
pub mod error;
pub mod record;
pub mod runner;
pub mod stats;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use config::{chebyshev_multiplier, DetectorConfig};
pub use detector::{
    AnomalyDetector, ChebyshevDetector, DetectorContext, DetectorSnapshot, ScoreBreakdown,
};
pub use error::{DetectorError, DetectorResult};
pub use record::{parse_timestamp, DetectorOutput, InputRecord, ScoredRecord};
pub use runner::{DetectorRun, RunSummary};
pub use stats::{BoundSide, OutlierBounds, RunningStats};

/// Default stage-1 tail probability (loose filter, `k1 ≈ 3.16`).
pub const DEFAULT_STAGE1_PROBABILITY: f64 = 0.1;

/// Default stage-2 tail probability (reported boundary, `k2 ≈ 31.6`).
pub const DEFAULT_STAGE2_PROBABILITY: f64 = 0.001;

/// Standard deviation used while a stage has seen exactly one value.
pub const STD_DEV_FLOOR: f64 = 0.000_001;

/// Standard deviation a stage reports before its first value.
pub const INITIAL_STD_DEV: f64 = 1.0;
