use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use zodiac_ephemeris::chart::Ephemeris;
use zodiac_ephemeris::config::{ServerConfig, load_server_config};
use zodiac_ephemeris::server::{AppState, serve};

#[derive(Parser)]
#[command(author, version, about = "Serve the zodiac ephemeris JSON API and HTML page")]
struct Cli {
    /// TOML or YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind (overrides the config file)
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => load_server_config(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(bind) = cli.bind {
        config.bind_address = bind;
    }

    // RUST_LOG takes precedence over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let addr = config.socket_addr()?;
    info!(
        %addr,
        render_timeout_ms = config.render_timeout_ms,
        config = ?cli.config,
        "starting ephemeris service"
    );
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    serve(listener, AppState::new(Ephemeris::default(), config)).await?;
    Ok(())
}
