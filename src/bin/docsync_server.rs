use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::{self, layer::SubscriberExt, util::SubscriberInitExt};

use docsync::gemini::GeminiClient;
use docsync::server::{router, AppState};

#[derive(Parser)]
#[command(author, version = "0.1.0", about, long_about = None)]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(short, long, default_value = "0.0.0.0:5000")]
    address: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Default GitHub token (overrides the GITHUB_TOKEN environment variable)
    #[arg(short = 't', long)]
    github_token: Option<String>,

    /// Gemini API key (overrides the GEMINI_API_KEY environment variable)
    #[arg(short = 'k', long)]
    gemini_api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let level = if cli.debug { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},{}", level, env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_ansi(false))
        .init();

    let github_token = cli
        .github_token
        .or_else(|| std::env::var("GITHUB_TOKEN").ok());
    let gemini_api_key = cli
        .gemini_api_key
        .or_else(|| std::env::var("GEMINI_API_KEY").ok());

    if github_token.is_some() {
        tracing::info!("using a server-side default GitHub token");
    } else {
        tracing::warn!("no default GitHub token configured; requests must supply their own");
    }

    let model = match gemini_api_key {
        Some(key) if !key.trim().is_empty() => {
            Some(GeminiClient::new(reqwest::Client::new(), key))
        }
        _ => {
            tracing::error!(
                "GEMINI_API_KEY is not set; model-backed endpoints will report an error"
            );
            None
        }
    };

    let addr: SocketAddr = cli.address.parse()?;
    let app = router(AppState::new(github_token, model));

    tracing::info!("DocSync server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
