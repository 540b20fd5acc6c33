use std::io::Write;
use std::path::Path;

use colored::Colorize;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::client::AnalysisService;
use crate::controller::{FormController, SubmitError, UiState, View};
use crate::report;

#[derive(Debug, Error)]
pub enum UiError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Commands accepted while the summary is displayed.
#[derive(Debug, PartialEq, Eq)]
enum SummaryCommand<'a> {
    Reset,
    Save(&'a str),
    Quit,
    Unknown,
}

fn parse_summary_command(line: &str) -> SummaryCommand<'_> {
    let line = line.trim();
    match line {
        "r" | "reset" => SummaryCommand::Reset,
        "q" | "quit" => SummaryCommand::Quit,
        _ => match line.strip_prefix("s ").or_else(|| line.strip_prefix("save ")) {
            Some(path) if !path.trim().is_empty() => SummaryCommand::Save(path.trim()),
            _ => SummaryCommand::Unknown,
        },
    }
}

/// Render the visible surface: the form or the summary, with the
/// notification overlay on top when it is showing.
pub fn render(state: &UiState) -> String {
    let mut out = match state.view() {
        View::Form => render_form(state),
        View::Summary => report::render_terminal(&state.summary_content),
    };
    if state.show_notification {
        out.push_str(&render_notification(&state.notification_message));
    }
    out
}

fn render_form(state: &UiState) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "═══ GitMentor ═══".bold()));
    out.push_str(&format!("Repository URL: {}\n", state.url));
    out.push_str(&format!("Feature:        {}\n", state.query));
    if state.loading {
        out.push_str(&format!("{}\n", "Analyzing repository...".yellow()));
    }
    out
}

pub fn render_notification(message: &str) -> String {
    let width = message.chars().count() + 2;
    format!(
        "┌{}┐\n{}\n└{}┘\n",
        "─".repeat(width),
        format!("│ {} │", message).red().bold(),
        "─".repeat(width)
    )
}

/// Report a failed one-shot submission. Only the notification text is
/// written; status codes and transport details stay in the log.
pub fn write_failure<W: Write>(err: &SubmitError, out: &mut W) -> std::io::Result<()> {
    let message = err.user_message().unwrap_or("Request was not completed.");
    write!(out, "{}", render_notification(message))?;
    out.flush()
}

/// Line-driven form session.
///
/// In the form the user enters a URL (blank keeps the previous one) and a
/// feature description, which are submitted right away. A notification is
/// dismissed by any line. From the summary, `r` returns to the form,
/// `s <path>` saves the document and `q` quits. End of input ends the session.
pub async fn run_interactive<R, W>(
    controller: &mut FormController,
    service: &dyn AnalysisService,
    input: R,
    out: &mut W,
) -> Result<(), UiError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        let state = controller.state().clone();

        if state.show_notification {
            write!(out, "{}", render_notification(&state.notification_message))?;
            write!(out, "Press Enter to dismiss: ")?;
            out.flush()?;
            if lines.next_line().await?.is_none() {
                break;
            }
            controller.dismiss_notification();
            continue;
        }

        match state.view() {
            View::Form => {
                if state.url.is_empty() {
                    write!(out, "Repository URL: ")?;
                } else {
                    write!(out, "Repository URL [{}]: ", state.url)?;
                }
                out.flush()?;
                let Some(url) = lines.next_line().await? else { break };
                if !url.trim().is_empty() {
                    controller.set_url(url);
                }

                write!(out, "Feature description: ")?;
                out.flush()?;
                let Some(query) = lines.next_line().await? else { break };
                controller.set_query(query);

                let Ok(pending) = controller.begin_submit() else {
                    continue;
                };
                write!(out, "{}", render(controller.state()))?;
                out.flush()?;

                let outcome = service.analyze(&pending.submission).await;
                match controller.complete(pending.ticket, outcome) {
                    Ok(()) => write!(out, "{}", render(controller.state()))?,
                    Err(err) => debug!(error = %err, "submission did not produce a summary"),
                }
            }
            View::Summary => {
                write!(out, "[r] new query  [s <path>] save  [q] quit: ")?;
                out.flush()?;
                let Some(line) = lines.next_line().await? else { break };
                match parse_summary_command(&line) {
                    SummaryCommand::Reset => controller.reset(),
                    SummaryCommand::Save(path) => {
                        match report::output(&state.summary_content, Some(Path::new(path))) {
                            Ok(()) => writeln!(out, "Saved to {}", path)?,
                            Err(err) => writeln!(out, "{}", err.to_string().red())?,
                        }
                    }
                    SummaryCommand::Quit => break,
                    SummaryCommand::Unknown => writeln!(out, "Unknown command: {}", line.trim())?,
                }
            }
        }
    }

    info!("interactive session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FixtureAnalysisService;
    use crate::client::ClientError;
    use crate::controller::{
        CONNECT_FAILURE_MESSAGE, HTTP_FAILURE_MESSAGE, INVALID_URL_MESSAGE, MISSING_FIELDS_MESSAGE,
    };

    async fn run_script(controller: &mut FormController, script: &str) -> String {
        let service = FixtureAnalysisService::new();
        let mut out = Vec::new();
        run_interactive(controller, &service, script.as_bytes(), &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_summary_command() {
        assert_eq!(parse_summary_command("r"), SummaryCommand::Reset);
        assert_eq!(parse_summary_command(" quit "), SummaryCommand::Quit);
        assert_eq!(parse_summary_command("s out.md"), SummaryCommand::Save("out.md"));
        assert_eq!(parse_summary_command("save  plan.md "), SummaryCommand::Save("plan.md"));
        assert_eq!(parse_summary_command("s "), SummaryCommand::Unknown);
        assert_eq!(parse_summary_command("x"), SummaryCommand::Unknown);
    }

    #[test]
    fn test_write_failure_hides_http_status() {
        let err = SubmitError::Client(ClientError::Http { status: 500 });
        let mut out = Vec::new();
        write_failure(&err, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, render_notification(HTTP_FAILURE_MESSAGE));
        assert!(!text.contains("500"));
        assert!(!text.contains("Http"));
    }

    #[tokio::test]
    async fn test_write_failure_hides_transport_details() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let source = reqwest::Client::builder()
            .no_proxy()
            .build()
            .unwrap()
            .post(format!("http://{}/api/process", addr))
            .send()
            .await
            .unwrap_err();

        let err = SubmitError::Client(ClientError::Network(source));
        let mut out = Vec::new();
        write_failure(&err, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, render_notification(CONNECT_FAILURE_MESSAGE));
        assert!(!text.contains("127.0.0.1"));
        assert!(!text.contains("reqwest"));
    }

    #[test]
    fn test_render_form_shows_loading() {
        let state = UiState {
            url: "https://github.com/a/b".to_string(),
            loading: true,
            ..Default::default()
        };
        let rendered = render(&state);
        assert!(rendered.contains("Repository URL: https://github.com/a/b"));
        assert!(rendered.contains("Analyzing repository..."));
    }

    #[test]
    fn test_render_summary_hides_form() {
        let state = UiState {
            url: "https://github.com/a/b".to_string(),
            show_summary: true,
            summary_content: "# repo\n\nbody\n".to_string(),
            ..Default::default()
        };
        let rendered = render(&state);
        assert!(rendered.contains("body"));
        assert!(!rendered.contains("Repository URL"));
    }

    #[test]
    fn test_render_overlays_notification() {
        let state = UiState {
            show_notification: true,
            notification_message: HTTP_FAILURE_MESSAGE.to_string(),
            ..Default::default()
        };
        let rendered = render(&state);
        assert!(rendered.contains("Repository URL"));
        assert!(rendered.contains(HTTP_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn test_session_displays_summary() {
        let mut controller = FormController::new();
        let out = run_script(&mut controller, "https://github.com/a/b\nadd a wishlist\nq\n").await;

        assert!(out.contains("Analyzing repository..."));
        assert!(out.contains("acme/storefront"));
        assert!(out.contains("Potential Challenges"));
        assert_eq!(controller.state().view(), View::Summary);
    }

    #[tokio::test]
    async fn test_session_reports_invalid_url_then_dismisses() {
        let mut controller = FormController::new();
        let out = run_script(&mut controller, "not a url\nadd a wishlist\n\n").await;

        assert!(out.contains(INVALID_URL_MESSAGE));
        assert!(!out.contains("Analyzing repository..."));
        assert!(!controller.state().show_notification);
        assert_eq!(controller.state().view(), View::Form);
    }

    #[tokio::test]
    async fn test_session_reports_missing_query() {
        let mut controller = FormController::new();
        let out = run_script(&mut controller, "https://github.com/a/b\n   \n").await;
        assert!(out.contains(MISSING_FIELDS_MESSAGE));
        assert!(controller.state().show_notification);
    }

    #[tokio::test]
    async fn test_session_reset_keeps_url() {
        let mut controller = FormController::new();
        let out = run_script(
            &mut controller,
            "https://github.com/a/b\nfirst\nr\n\nsecond\nq\n",
        )
        .await;

        assert!(out.contains("Repository URL [https://github.com/a/b]: "));
        assert_eq!(controller.state().url, "https://github.com/a/b");
        assert_eq!(controller.state().query, "second");
        assert_eq!(controller.state().view(), View::Summary);
    }

    #[tokio::test]
    async fn test_session_saves_document() {
        let path = std::env::temp_dir().join(format!("gitmentor_test_session_save_{}.md", std::process::id()));
        let script = format!("https://github.com/a/b\nq\ns {}\nq\n", path.display());
        let mut controller = FormController::new();
        let out = run_script(&mut controller, &script).await;

        assert!(out.contains("Saved to"));
        let saved = std::fs::read_to_string(&path).unwrap();
        assert_eq!(saved, controller.state().summary_content);
        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_session_ends_on_eof() {
        let mut controller = FormController::new();
        let out = run_script(&mut controller, "").await;
        assert_eq!(out, "Repository URL: ");
    }
}
