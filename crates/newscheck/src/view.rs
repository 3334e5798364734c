//! Presentation model derived from `RequestState` alone. Pure: the same
//! state always yields the same `Presentation`.

use crate::client::RequestState;
use crate::schema::{Source, Verdict, VerificationResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Caution,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub tone: Tone,
}

impl From<Verdict> for Badge {
    fn from(verdict: Verdict) -> Self {
        let tone = match verdict {
            Verdict::Real => Tone::Positive,
            Verdict::Fake => Tone::Negative,
            Verdict::Uncertain => Tone::Caution,
        };
        Badge {
            label: verdict.as_str(),
            tone,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultBlock {
    pub badge: Badge,
    pub confidence: f64,
    pub confidence_label: String,
    pub explanation: String,
    pub sources: Vec<Source>,
}

impl From<&VerificationResult> for ResultBlock {
    fn from(r: &VerificationResult) -> Self {
        Self {
            badge: r.verdict.into(),
            confidence: r.confidence,
            // f64 Display drops a trailing ".0": 92.0 -> "92"
            confidence_label: format!("{}% Confident", r.confidence),
            explanation: r.explanation.clone(),
            sources: r.sources.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    pub submit_disabled: bool,
    pub submit_label: &'static str,
    pub banner: Option<String>,
    pub result: Option<ResultBlock>,
}

impl Presentation {
    pub fn from_state(state: &RequestState) -> Self {
        let submit_disabled = state.is_loading();
        Self {
            submit_disabled,
            submit_label: if submit_disabled { "Verifying..." } else { "Check News" },
            banner: state.error().map(|e| e.to_string()),
            result: state.result().map(ResultBlock::from),
        }
    }
}
