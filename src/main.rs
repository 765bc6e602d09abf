mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::Parser;
use parking_lot::Mutex;

use wyca_client::config::ClientConfig;
use wyca_client::external::HttpFetcher;
use wyca_client::logging::{init_logging, LoggingConfig};
use wyca_client::render::{ChartOptions, Page, RenderOutcome};
use wyca_client::services::ViewController;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = cli::Cli::parse();

    // Initialize logging FIRST
    let logging = LoggingConfig::from_env().with_verbosity(cli.verbose);
    init_logging(logging).map_err(|e| anyhow!("failed to initialize logging: {e}"))?;
    tracing::debug!("Command line input recorded: {cli:?}");

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(token) = &cli.csrf_token {
        config.csrf_token = Some(token.clone());
    }
    config.validate().map_err(|e| anyhow!(e))?;

    let fetcher = HttpFetcher::new(&config).context("failed to build HTTP client")?;
    tracing::info!("🚀 Using web application at {}", fetcher.base_url());

    let page = Arc::new(Mutex::new(Page::new()));
    let controller = ViewController::new(
        Arc::new(fetcher),
        Arc::clone(&page),
        ChartOptions::with_size(config.chart_width, config.chart_height),
        config.csrf_token.clone(),
    );

    let request = cli.command.view_request();
    let outcome = controller.show(&request).await;

    let page = page.lock();
    for alert in page.alerts() {
        eprintln!("{alert}");
    }
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&*page)?);
    } else {
        print!("{page}");
    }

    match outcome {
        Ok(RenderOutcome::Rendered) => Ok(ExitCode::SUCCESS),
        Ok(RenderOutcome::Stale) | Ok(RenderOutcome::Failed) => Ok(ExitCode::FAILURE),
        Err(e) => {
            tracing::error!("{}: {}", request.kind(), e);
            Ok(ExitCode::FAILURE)
        }
    }
}
