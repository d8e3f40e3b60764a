//! httplog demo server binary.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use httplog_server::{Settings, build_router, run_server};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Serves a demo router with request and response logging.
#[derive(Debug, Parser)]
#[command(name = "httplog-server", version)]
struct Args {
    /// Config file; defaults to ./config.{yaml,toml,json} when present.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Operational logs go to stderr so stdout carries only log records
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref()).context("loading configuration")?;
    tracing::info!(
        addr = %settings.server.addr,
        writer = ?settings.log.writer,
        "Config loaded"
    );

    let sink = settings.log.open_sink().context("opening log sink")?;
    let router = build_router(&settings, sink);
    tracing::info!("Router loaded");

    run_server(&settings.server, router)
        .await
        .context("running server")?;

    Ok(())
}
