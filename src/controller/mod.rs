pub mod state;

pub use state::{UiState, View};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::client::{AnalysisResult, AnalysisService, ClientError};
use crate::report;
use crate::submission::{self, Submission, ValidationError};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in both the URL and query fields.";
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid URL.";
pub const HTTP_FAILURE_MESSAGE: &str = "Failed to receive data.";
pub const CONNECT_FAILURE_MESSAGE: &str = "Failed to connect to the server.";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Result discarded: a newer submission was started")]
    Superseded,
}

impl SubmitError {
    /// Text shown on the notification surface, if this error is user-facing.
    /// Status codes and transport details go to the log only.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            SubmitError::Validation(ValidationError::MissingField) => Some(MISSING_FIELDS_MESSAGE),
            SubmitError::Validation(ValidationError::InvalidUrl(_)) => Some(INVALID_URL_MESSAGE),
            SubmitError::Client(ClientError::Http { .. }) => Some(HTTP_FAILURE_MESSAGE),
            SubmitError::Client(ClientError::Network(_) | ClientError::Parse(_)) => {
                Some(CONNECT_FAILURE_MESSAGE)
            }
            SubmitError::Superseded => None,
        }
    }
}

/// Identifies the submission a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// A validated submission waiting for its reply.
#[derive(Debug)]
pub struct PendingRequest {
    pub ticket: Ticket,
    pub submission: Submission,
}

/// Owns the form state and drives submissions through validation, the
/// analysis service and the document formatter.
///
/// Every submission takes a fresh generation ticket. Only the reply carrying
/// the latest ticket is applied; older replies are dropped, so a slow stale
/// request can never overwrite a newer result (last submission wins).
#[derive(Debug, Default)]
pub struct FormController {
    state: UiState,
    generation: u64,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.state.url = url.into();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
    }

    /// Start a submission: raise the loading flag and validate the fields.
    ///
    /// On a validation failure the notification is shown, loading is cleared
    /// and no request should be made.
    pub fn begin_submit(&mut self) -> Result<PendingRequest, SubmitError> {
        self.generation += 1;
        let ticket = Ticket(self.generation);
        self.state.loading = true;

        match submission::validate(&self.state.url, &self.state.query) {
            Ok(submission) => {
                debug!(ticket = ticket.0, repo_url = %submission.repo_url, "submission validated");
                Ok(PendingRequest { ticket, submission })
            }
            Err(err) => {
                let err = SubmitError::from(err);
                info!(error = %err, "submission rejected");
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// Apply the outcome of a request started by `begin_submit`.
    ///
    /// A result for a superseded ticket leaves the state untouched.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<AnalysisResult, ClientError>,
    ) -> Result<(), SubmitError> {
        if ticket.0 != self.generation {
            warn!(ticket = ticket.0, current = self.generation, "dropping reply for superseded submission");
            return Err(SubmitError::Superseded);
        }

        match outcome {
            Ok(result) => {
                info!(repository = %result.repository_name, "analysis received");
                self.state.summary_content = report::format_document(&result);
                self.state.show_notification = false;
                self.state.show_summary = true;
                self.state.loading = false;
                Ok(())
            }
            Err(err) => {
                let err = SubmitError::from(err);
                warn!(error = %err, "analysis request failed");
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// Validate, make one request and apply its outcome.
    pub async fn submit(&mut self, service: &dyn AnalysisService) -> Result<(), SubmitError> {
        let pending = self.begin_submit()?;
        let outcome = service.analyze(&pending.submission).await;
        self.complete(pending.ticket, outcome)
    }

    pub fn dismiss_notification(&mut self) {
        self.state.show_notification = false;
    }

    /// Return from the summary to the form. The URL is kept for the next query.
    /// Replies to submissions started before the reset are treated as stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state.loading = false;
        self.state.query.clear();
        self.state.show_summary = false;
        self.state.summary_content.clear();
        self.state.show_notification = false;
        self.state.notification_message.clear();
    }

    fn fail(&mut self, err: &SubmitError) {
        if let Some(message) = err.user_message() {
            self.state.notification_message = message.to_string();
            self.state.show_notification = true;
        }
        self.state.loading = false;
    }
}
