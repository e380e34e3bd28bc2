use serde::{Deserialize, Serialize, Serializer};

use super::client::ScoringError;

/// Threshold displayed when the service does not report the one it applied.
pub const DEFAULT_THRESHOLD: f64 = 0.35;

/// The single user-facing message for every failed scoring request.
pub const REQUEST_FAILED_MESSAGE: &str =
    "Request failed. Check the scoring API URL and try again.";

/// Categorical decision returned by the service. Anything other than
/// `ACCEPT` is treated as a rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Other(String),
}

impl Decision {
    pub const ACCEPT: &'static str = "ACCEPT";

    pub fn from_wire(raw: String) -> Self {
        if raw == Self::ACCEPT {
            Self::Accept
        } else {
            Self::Other(raw)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Accept => Self::ACCEPT,
            Self::Other(raw) => raw,
        }
    }

    pub fn is_accept(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

impl Serialize for Decision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub threshold_used: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A successfully parsed scoring response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringResult {
    pub default_probability: f64,
    pub interest_rate_percent: f64,
    pub decision: Decision,
    pub explain: Explanation,
}

impl ScoringResult {
    pub fn threshold_used(&self) -> f64 {
        self.explain.threshold_used
    }
}

/// Result of one submission, settled at the network boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringOutcome {
    Success(ScoringResult),
    Failure(String),
}

impl ScoringOutcome {
    pub fn request_failed() -> Self {
        Self::Failure(REQUEST_FAILED_MESSAGE.to_string())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl From<Result<ScoringResult, ScoringError>> for ScoringOutcome {
    fn from(value: Result<ScoringResult, ScoringError>) -> Self {
        match value {
            Ok(result) => Self::Success(result),
            Err(_) => Self::request_failed(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    error: Option<String>,
    default_probability: Option<f64>,
    interest_rate_percent: Option<f64>,
    decision: Option<String>,
    explain: Option<WireExplain>,
}

#[derive(Debug, Default, Deserialize)]
struct WireExplain {
    threshold_used: Option<f64>,
    note: Option<String>,
}

/// Parses a raw response body into a [`ScoringResult`], substituting the
/// default threshold when `explain.threshold_used` is missing or zero.
pub fn parse_scoring_body(body: &[u8]) -> Result<ScoringResult, ScoringError> {
    let wire: WireResponse = serde_json::from_slice(body)?;

    if let Some(message) = wire.error {
        return Err(ScoringError::Service(message));
    }

    let default_probability = wire
        .default_probability
        .ok_or(ScoringError::MissingField("default_probability"))?;
    let interest_rate_percent = wire
        .interest_rate_percent
        .ok_or(ScoringError::MissingField("interest_rate_percent"))?;
    let decision = wire
        .decision
        .map(Decision::from_wire)
        .ok_or(ScoringError::MissingField("decision"))?;

    let explain = wire.explain.unwrap_or_default();
    let threshold_used = explain
        .threshold_used
        .filter(|value| value.is_finite() && *value != 0.0)
        .unwrap_or(DEFAULT_THRESHOLD);

    Ok(ScoringResult {
        default_probability,
        interest_rate_percent,
        decision,
        explain: Explanation {
            threshold_used,
            note: explain.note,
        },
    })
}
