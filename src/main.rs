mod client;
mod config;
mod controller;
mod report;
mod submission;
mod ui;

use clap::Parser;
use std::path::PathBuf;
use tracing::{info, info_span};
use tracing_subscriber::EnvFilter;

use client::{AnalysisService, FixtureAnalysisService, HttpAnalysisService};
use controller::FormController;

/// GitMentor — asks the analysis API how to implement a feature in a
/// repository and renders the returned plan as a markdown document.
#[derive(Parser, Debug)]
#[command(name = "gitmentor", version, about)]
struct Cli {
    /// Repository URL (e.g., https://github.com/org/repo)
    repo_url: Option<String>,

    /// Description of the feature to implement
    ///
    /// When omitted, an interactive session is started instead; a given
    /// repository URL is then offered as the default.
    query: Option<String>,

    /// Optional output file path for the markdown document
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Always run the interactive form session
    #[arg(short, long)]
    interactive: bool,

    /// Analysis API endpoint (overrides .gitmentor.toml and GITMENTOR_API_URL)
    #[arg(long)]
    endpoint: Option<String>,

    /// Answer from a built-in sample response (no network access needed)
    #[arg(long)]
    r#mock: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let service: Box<dyn AnalysisService> = if cli.r#mock {
        info!("using bundled sample response for demo");
        Box::new(FixtureAnalysisService::new())
    } else {
        info!("loading configuration");
        let config = config::Config::load()?;
        let endpoint = config.endpoint(cli.endpoint.as_deref())?;
        let http = HttpAnalysisService::new(endpoint, config.user_agent())?;
        info!(endpoint = %http.endpoint(), "using analysis API");
        Box::new(http)
    };

    let mut controller = FormController::new();
    if let Some(url) = &cli.repo_url {
        controller.set_url(url.as_str());
    }

    match (&cli.query, cli.interactive) {
        (Some(query), false) => {
            let _main_span = info_span!("analyze", repo_url = %controller.state().url).entered();
            controller.set_query(query.as_str());

            info!("submitting");
            if let Err(err) = controller.submit(service.as_ref()).await {
                info!(error = %err, "submission failed");
                ui::write_failure(&err, &mut std::io::stderr())?;
                std::process::exit(1);
            }

            info!("writing document");
            report::output(&controller.state().summary_content, cli.output.as_deref())?;
            info!("done");
        }
        _ => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            ui::run_interactive(&mut controller, service.as_ref(), stdin, &mut stdout).await?;
        }
    }

    Ok(())
}
