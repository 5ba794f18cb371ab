use std::error::Error;
use std::process::ExitCode;

use ai_llm_service::telemetry;
use colored::Colorize;
use contextor::{ContextorError, Orchestrator};
use tracing::{Level, error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // `.env` is optional; real deployments set variables directly.
    dotenvy::dotenv().ok();

    let filter = telemetry::env_filter_with_level("info", &["arxiv_qa"], Level::INFO);
    tracing_subscriber::registry()
        .with(filter)
        .with(telemetry::layer())
        .try_init()?;

    let store = secret_store::default_store()?;
    let orchestrator = match Orchestrator::from_secrets(&store) {
        Ok(o) => o,
        Err(ContextorError::Secrets(err)) => {
            error!(error = %err, "credentials are not configured");
            eprintln!("{} {err}\n", "Configuration error:".red().bold());
            eprintln!("{}", err.setup_guidance().yellow());
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err.into()),
    };

    info!(version = env!("CARGO_PKG_VERSION"), "starting arxiv-qa");
    api::start(orchestrator).await?;

    Ok(ExitCode::SUCCESS)
}
