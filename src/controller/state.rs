/// Which of the two mutually exclusive views is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Form,
    Summary,
}

/// Transient state behind the form, summary and notification surfaces.
/// Nothing here is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Repository URL as typed
    pub url: String,
    /// Feature description as typed
    pub query: String,
    /// True from submit start until the latest submission settles
    pub loading: bool,
    pub show_summary: bool,
    /// Formatted markdown document for the summary view
    pub summary_content: String,
    pub show_notification: bool,
    pub notification_message: String,
}

impl UiState {
    pub fn view(&self) -> View {
        if self.show_summary {
            View::Summary
        } else {
            View::Form
        }
    }
}
