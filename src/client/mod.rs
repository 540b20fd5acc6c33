pub mod fixture;
pub mod types;

pub use fixture::FixtureAnalysisService;
pub use types::AnalysisResult;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::submission::Submission;

/// Endpoint used when neither the CLI, the config file nor the environment names one.
pub const DEFAULT_ENDPOINT: &str = "https://api.gitmentor.co/api/process";

pub const DEFAULT_USER_AGENT: &str = concat!("gitmentor/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Analysis API returned HTTP {status}")]
    Http { status: u16 },

    #[error("Analysis API request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to parse analysis response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of analysis results for a submission.
/// Implementations must be Send + Sync so the controller can hold them across awaits.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Make exactly one attempt at analyzing the submission. No retries.
    async fn analyze(&self, submission: &Submission) -> Result<AnalysisResult, ClientError>;
}

/// Talks to the analysis API over HTTP.
pub struct HttpAnalysisService {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpAnalysisService {
    pub fn new(endpoint: reqwest::Url, user_agent: &str) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: reqwest::Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    /// POST the submission as JSON and decode the reply.
    ///
    /// A non-success status is logged and reported as `ClientError::Http`;
    /// the body of such a reply is never read. No timeout is applied.
    #[instrument(skip(self, submission), fields(endpoint = %self.endpoint, repo_url = %submission.repo_url))]
    async fn analyze(&self, submission: &Submission) -> Result<AnalysisResult, ClientError> {
        debug!("sending analysis request");
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), "analysis API returned a failure status");
            return Err(ClientError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!(body_bytes = body.len(), "received analysis response");

        let result: AnalysisResult = serde_json::from_str(&body)?;
        debug!(
            repository = %result.repository_name,
            steps = result.implementation_steps.len(),
            files = result.relevant_files.len(),
            "parsed analysis response"
        );
        Ok(result)
    }
}
