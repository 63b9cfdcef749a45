//! Stock dashboard server

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use dash_stock::{DashboardConfig, DashboardEngine};
use dash_utils::{Config, LogFormat};
use dash_web::{AppState, PageRenderer, ServerConfig, create_app};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "stock-dashboard")]
#[command(about = "Browser dashboard for stock prices, fundamentals and news", long_about = None)]
struct Args {
    /// Address to bind (overrides DASHBOARD_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides DASHBOARD_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// CSS file replacing the built-in style sheet
    #[arg(long, env = "DASHBOARD_STYLESHEET")]
    stylesheet: Option<PathBuf>,

    /// Maximum number of news items shown
    #[arg(long)]
    news_limit: Option<usize>,

    /// Provider request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Emit JSON log lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let app_config = Config::from_env();

    dash_utils::init_tracing_with(
        LogFormat::from_json_flag(args.log_json || app_config.is_production()),
        "info,tower_http=debug",
    );

    let mut builder = DashboardConfig::builder()
        .with_env_api_key()
        .request_timeout(Duration::from_secs(args.timeout_secs));
    if let Some(limit) = args.news_limit {
        builder = builder.news_limit(limit);
    }
    if let Some(path) = &args.stylesheet {
        let css = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read style sheet {}", path.display()))?;
        builder = builder.stylesheet(css);
    }
    let config = builder.build()?;

    if config.require_api_key().is_err() {
        warn!("ALPHA_VANTAGE_API_KEY is not set; fundamentals and news will report an error");
    }

    let engine = DashboardEngine::from_config(&config)?;
    let renderer = PageRenderer::new(config.stylesheet.clone())?;
    let state = AppState::new(engine, renderer);

    let mut server = ServerConfig::from_env();
    if let Some(host) = args.host {
        server.host = host;
    }
    if let Some(port) = args.port {
        server.port = port;
    }

    let addr = server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        app = %app_config.app_name,
        environment = %app_config.environment,
        %addr,
        "Starting stock dashboard"
    );

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
}
