use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use exam_core::FeedbackRequest;
use exam_core::model::{FeedbackOutcome, FeedbackResult};

use crate::error::FeedbackError;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl FeedbackConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Resolve from `MARITIME_FEEDBACK_URL` and `MARITIME_FEEDBACK_TIMEOUT_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("MARITIME_FEEDBACK_URL").ok(),
            env::var("MARITIME_FEEDBACK_TIMEOUT_SECS").ok(),
        )
    }

    fn from_vars(base_url: Option<String>, timeout_secs: Option<String>) -> Self {
        let base_url = base_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let timeout_secs = timeout_secs
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/feedback", self.base_url.trim().trim_end_matches('/'))
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Source of explanations for submitted answers.
///
/// Implementations must always produce a usable result.
#[async_trait]
pub trait FeedbackProvider: Send + Sync {
    async fn feedback_for(&self, request: &FeedbackRequest) -> FeedbackResult;
}

/// HTTP client for the feedback service.
#[derive(Clone)]
pub struct FeedbackClient {
    client: Client,
    endpoint: String,
}

impl FeedbackClient {
    /// # Errors
    ///
    /// Returns `FeedbackError::Http` if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, FeedbackError> {
        Self::new(&FeedbackConfig::from_env())
    }

    /// # Errors
    ///
    /// Returns `FeedbackError::Http` if the HTTP client cannot be built.
    pub fn new(config: &FeedbackConfig) -> Result<Self, FeedbackError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask the service to explain an answer.
    ///
    /// Never fails: any transport error, non-2xx status or malformed body yields
    /// [`FeedbackResult::fallback`] for `is_correct` / `correct_answer`. No retry.
    pub async fn fetch_feedback(
        &self,
        question: &str,
        user_answer: &str,
        correct_answer: &str,
        is_correct: bool,
    ) -> FeedbackResult {
        let payload = FeedbackPayload {
            question,
            user_answer,
            correct_answer,
            is_correct,
        };

        match self.request(&payload).await {
            Ok(result) => {
                let expected = FeedbackOutcome::from_correct(is_correct);
                if result.outcome != expected {
                    tracing::warn!(
                        received = result.outcome.marker(),
                        expected = expected.marker(),
                        "feedback outcome disagrees with local grading"
                    );
                }
                result.with_outcome(expected).normalized()
            }
            Err(err) => {
                tracing::warn!(error = %err, endpoint = %self.endpoint, "feedback unavailable, using fallback");
                FeedbackResult::fallback(is_correct, correct_answer)
            }
        }
    }

    async fn request(&self, payload: &FeedbackPayload<'_>) -> Result<FeedbackResult, FeedbackError> {
        let response = self.client.post(&self.endpoint).json(payload).send().await?;

        if !response.status().is_success() {
            return Err(FeedbackError::HttpStatus(response.status()));
        }

        let body: FeedbackResult = response.json().await?;
        if body.explanation.trim().is_empty() {
            return Err(FeedbackError::EmptyExplanation);
        }

        tracing::debug!(outcome = body.outcome.marker(), "feedback received");
        Ok(body)
    }
}

#[async_trait]
impl FeedbackProvider for FeedbackClient {
    async fn feedback_for(&self, request: &FeedbackRequest) -> FeedbackResult {
        self.fetch_feedback(
            &request.question,
            request.user_answer.as_str(),
            request.correct_answer.as_str(),
            request.is_correct,
        )
        .await
    }
}

#[derive(Debug, Serialize)]
struct FeedbackPayload<'a> {
    question: &'a str,
    user_answer: &'a str,
    correct_answer: &'a str,
    is_correct: bool,
}
