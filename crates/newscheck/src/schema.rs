use std::fmt;

use serde::{Deserialize, Serialize};

/// Path of the verification endpoint, relative to the service base URL.
pub const CHECK_NEWS_PATH: &str = "/check-news";

/// Closed set of verdicts. Anything else on the wire is a decode failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Real,
    Fake,
    Uncertain,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Real => "REAL",
            Verdict::Fake => "FAKE",
            Verdict::Uncertain => "UNCERTAIN",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    #[serde(rename = "result")]
    pub verdict: Verdict,
    #[serde(serialize_with = "serialize_confidence")]
    pub confidence: f64,             // 0..=100
    pub explanation: String,
    pub sources: Vec<Source>,        // display order, duplicates allowed
}

/// Request body for `POST /check-news`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    pub statement: String,
}

/// Body returned by the service on a non-success status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("confidence {0} is outside 0..=100")]
    ConfidenceOutOfRange(f64),

    #[error("confidence {0} is not an integer")]
    FractionalConfidence(f64),

    #[error("explanation is empty")]
    EmptyExplanation,
}

impl VerificationResult {
    /// Decode and shape-check a success payload.
    pub fn from_json(bytes: &[u8]) -> Result<Self, SchemaError> {
        let result: Self = serde_json::from_slice(bytes)?;
        result.check()?;
        Ok(result)
    }

    pub fn check(&self) -> Result<(), SchemaError> {
        if !self.confidence.is_finite() || !(0.0..=100.0).contains(&self.confidence) {
            return Err(SchemaError::ConfidenceOutOfRange(self.confidence));
        }
        if self.explanation.trim().is_empty() {
            return Err(SchemaError::EmptyExplanation);
        }
        Ok(())
    }

    /// Stricter check used by the service: the model must report a whole
    /// percentage.
    pub fn require_integral_confidence(&self) -> Result<(), SchemaError> {
        if self.confidence.fract() != 0.0 {
            return Err(SchemaError::FractionalConfidence(self.confidence));
        }
        Ok(())
    }
}

/// Extract a string `detail` from an error body, if there is one.
pub fn detail_from_body(bytes: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(bytes).ok()?;
    value
        .get("detail")?
        .as_str()
        .filter(|d| !d.trim().is_empty())
        .map(str::to_string)
}

/// Whole percentages go out as JSON integers (`92`, not `92.0`).
fn serialize_confidence<S: serde::Serializer>(confidence: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if confidence.fract() == 0.0 && confidence.abs() <= i64::MAX as f64 {
        serializer.serialize_i64(*confidence as i64)
    } else {
        serializer.serialize_f64(*confidence)
    }
}
