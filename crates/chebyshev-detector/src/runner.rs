//! Drives one detector over one ordered record stream.

use std::borrow::Borrow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::detector::AnomalyDetector;
use crate::record::{InputRecord, ScoredRecord};

/// Totals for one stream evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Name of the detector that produced the scores.
    pub detector: String,
    /// Records scored.
    pub records: u64,
    /// Records with a non-zero score (including non-finite scores).
    pub anomalies: u64,
    /// Largest finite score seen, if any.
    pub max_score: Option<f64>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunSummary {
    fn new(detector: &str) -> Self {
        Self {
            detector: detector.to_string(),
            records: 0,
            anomalies: 0,
            max_score: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    fn record(&mut self, score: f64) {
        self.records += 1;
        if score != 0.0 {
            self.anomalies += 1;
        }
        if score.is_finite() {
            self.max_score = Some(self.max_score.map_or(score, |m| m.max(score)));
        }
    }
}

/// A single evaluation run: one detector, one stream, records in order.
pub struct DetectorRun<D> {
    detector: D,
    summary: RunSummary,
}

impl<D: AnomalyDetector> DetectorRun<D> {
    pub fn new(detector: D) -> Self {
        let summary = RunSummary::new(detector.name());
        Self { detector, summary }
    }

    /// Score the next record in the stream.
    pub fn process(&mut self, record: &InputRecord) -> ScoredRecord {
        let output = self.detector.handle_record(record);
        self.summary.record(output.anomaly_score);
        ScoredRecord::new(record, output)
    }

    /// Score every record and close the run.
    pub fn run<I>(mut self, records: I) -> (Vec<ScoredRecord>, RunSummary)
    where
        I: IntoIterator,
        I::Item: Borrow<InputRecord>,
    {
        let scored: Vec<ScoredRecord> = records
            .into_iter()
            .map(|r| self.process(r.borrow()))
            .collect();
        let (_, summary) = self.finish();
        (scored, summary)
    }

    /// Close the run, returning the detector and the final summary.
    pub fn finish(mut self) -> (D, RunSummary) {
        self.summary.finished_at = Some(Utc::now());
        info!(
            detector = %self.summary.detector,
            records = self.summary.records,
            anomalies = self.summary.anomalies,
            max_score = ?self.summary.max_score,
            "detector run finished"
        );
        (self.detector, self.summary)
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }
}
