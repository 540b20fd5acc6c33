use async_trait::async_trait;
use tracing::info;

use super::{AnalysisResult, AnalysisService, ClientError};
use crate::submission::Submission;

const SAMPLE_RESPONSE: &str = include_str!("../../tests/fixtures/sample_response.json");

/// Serves the bundled sample reply instead of calling the API.
/// Lets the full submit → format → display pipeline run without network access.
pub struct FixtureAnalysisService {
    body: &'static str,
}

impl FixtureAnalysisService {
    pub fn new() -> Self {
        Self {
            body: SAMPLE_RESPONSE,
        }
    }
}

impl Default for FixtureAnalysisService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisService for FixtureAnalysisService {
    async fn analyze(&self, submission: &Submission) -> Result<AnalysisResult, ClientError> {
        info!(repo_url = %submission.repo_url, "answering from bundled fixture");
        Ok(serde_json::from_str(self.body)?)
    }
}
