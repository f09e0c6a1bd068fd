//! kiosque-triage
//!
//! Client for the remote malaria scoring service. Sends a completed
//! questionnaire and maps the response into a [`TriageResult`].

pub mod error;
pub mod wire;

use std::time::Duration;

use tracing::{info, warn};

use kiosque_core::models::submission::QuestionnaireResult;
use kiosque_core::models::triage::TriageResult;

use crate::error::TriageError;
use crate::wire::parse_response;

/// Default deployment of the scoring backend.
pub const DEFAULT_API_URL: &str = "https://backend-kiosque.onrender.com";

/// Message shown to the operator when scoring fails for any reason.
pub const FAILURE_ALERT: &str =
    "Une erreur est survenue lors du calcul du triage. Veuillez réessayer.";

const EVALUATE_PATH: &str = "/triage/evaluate";

/// Anything that can score a completed consultation.
///
/// Implementations block; async callers run them on a blocking thread.
pub trait Scorer: Send + Sync {
    fn evaluate(&self, submission: &QuestionnaireResult) -> Result<TriageResult, TriageError>;
}

/// Blocking HTTP client. Call from a blocking thread in async contexts.
#[derive(Clone)]
pub struct TriageClient {
    endpoint: String,
    agent: ureq::Agent,
}

impl TriageClient {
    pub fn new(api_url: &str, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            endpoint: endpoint_for(api_url),
            agent,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Scorer for TriageClient {
    /// Submit one consultation and return its scored result.
    fn evaluate(&self, submission: &QuestionnaireResult) -> Result<TriageResult, TriageError> {
        let body = serde_json::to_string(submission).map_err(|e| TriageError::Encode(e.to_string()))?;

        info!(
            endpoint = %self.endpoint,
            consultation_id = %submission.consultation_id,
            "submitting consultation for triage"
        );

        let mut response = self
            .agent
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .send(body)?;

        let status = response.status().as_u16();
        let text = response.body_mut().read_to_string()?;

        if !(200..300).contains(&status) {
            warn!(status, "triage service rejected the submission");
            return Err(TriageError::Status { status, body: text });
        }

        let result = parse_response(&text)?;
        info!(
            consultation_id = %submission.consultation_id,
            risk = result.risk_level.label(),
            score = result.score,
            "triage received"
        );
        Ok(result)
    }
}

/// `{api_url}/triage/evaluate`, tolerating a trailing slash on the base URL.
pub fn endpoint_for(api_url: &str) -> String {
    format!("{}{EVALUATE_PATH}", api_url.trim_end_matches('/'))
}
