use thiserror::Error;

/// Errors from detector configuration and record parsing.
///
/// Scoring itself never fails; these only surface at construction time or
/// when turning raw input lines into records.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("invalid {stage} probability: {value} (must be finite and in (0, 1])")]
    InvalidProbability { stage: &'static str, value: f64 },

    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

impl From<serde_json::Error> for DetectorError {
    fn from(e: serde_json::Error) -> Self {
        DetectorError::MalformedRecord(e.to_string())
    }
}

/// Convenience type alias for detector results.
pub type DetectorResult<T> = Result<T, DetectorError>;
