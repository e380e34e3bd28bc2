use async_trait::async_trait;
use tracing::{debug, warn};

use super::domain::ApplicantRequest;
use super::outcome::{parse_scoring_body, ScoringOutcome, ScoringResult};
use crate::config::ScoringConfig;

/// Path the scoring service exposes for single-applicant predictions.
pub const PREDICT_PATH: &str = "/predict";

/// Anything able to score an applicant. The web handlers and the CLI depend on
/// this seam so tests can swap in canned outcomes.
#[async_trait]
pub trait ScoringService: Send + Sync {
    async fn score(&self, applicant: &ApplicantRequest) -> ScoringOutcome;
}

/// Why a scoring request failed. Only used for logs; callers see the
/// collapsed [`ScoringOutcome::Failure`].
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("scoring service unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("scoring response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("scoring service reported an error: {0}")]
    Service(String),
    #[error("scoring response is missing `{0}`")]
    MissingField(&'static str),
}

/// reqwest-backed client for the external scoring service.
#[derive(Debug, Clone)]
pub struct HttpScoringClient {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpScoringClient {
    pub fn new(config: &ScoringConfig) -> Result<Self, ScoringError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            endpoint: format!("{}{PREDICT_PATH}", config.base_url.trim_end_matches('/')),
            client: builder.build()?,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issues exactly one POST; no retries.
    pub async fn request(
        &self,
        applicant: &ApplicantRequest,
    ) -> Result<ScoringResult, ScoringError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(applicant)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            debug!(%status, bytes = body.len(), "scoring service answered with non-success status");
        }

        parse_scoring_body(&body)
    }
}

#[async_trait]
impl ScoringService for HttpScoringClient {
    async fn score(&self, applicant: &ApplicantRequest) -> ScoringOutcome {
        match self.request(applicant).await {
            Ok(result) => {
                debug!(
                    endpoint = %self.endpoint,
                    probability = result.default_probability,
                    decision = result.decision.as_str(),
                    "applicant scored"
                );
                ScoringOutcome::Success(result)
            }
            Err(err) => {
                warn!(endpoint = %self.endpoint, error = %err, "scoring request failed");
                ScoringOutcome::request_failed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url_and_predict_path() {
        let client = HttpScoringClient::new(&ScoringConfig::new("http://127.0.0.1:8000/"))
            .expect("client builds");
        assert_eq!(client.endpoint(), "http://127.0.0.1:8000/predict");

        let client = HttpScoringClient::new(&ScoringConfig::new("https://scoring.example.com/v1"))
            .expect("client builds");
        assert_eq!(client.endpoint(), "https://scoring.example.com/v1/predict");
    }
}
