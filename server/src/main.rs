use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use ventura_narrator::{AnyNarrator, HttpNarrator, ScriptedNarrator};
use ventura_server::{Api, AppState, Config};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a YAML configuration file.
    #[arg(short, long)]
    config: Option<String>,

    /// Overrides the configured port.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();

    // Load config
    let config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("could not read config file {path}"))?;
            serde_yaml::from_str::<Config>(&raw).context("could not parse config file")?
        }
        None => Config::default(),
    };
    let port = args.port.unwrap_or(config.port);

    // Create logger
    let log_level =
        tracing::Level::from_str(&config.log_level).context("invalid log level in config")?;
    tracing_subscriber::fmt().with_max_level(log_level).init();

    // Pick the narrator
    let narrator = match &config.narrator {
        Some(narrator) => {
            info!(base_url = %narrator.base_url, "using HTTP narrator");
            AnyNarrator::Http(
                HttpNarrator::new(&narrator.base_url, narrator.api_key.clone())
                    .context("invalid narrator configuration")?,
            )
        }
        None => {
            info!("no narrator configured, using scripted lines");
            AnyNarrator::Scripted(ScriptedNarrator)
        }
    };

    let state = Arc::new(AppState::new(narrator));
    let app = Api::new(state).router();

    // Start server
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on {}", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("axum server error")?;

    Ok(())
}
