use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use cafe_api::app::{AppServices, build_app};
use cafe_api::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cafe_observability::init();

    let config = Cli::parse().into_config();
    config.validate()?;

    let report = cafe_infra::bootstrap(&config.data_dir, config.reset)
        .with_context(|| format!("preparing data directory {}", config.data_dir.display()))?;
    let services = AppServices::open(Arc::new(report.store))
        .context("loading ledgers")?;

    let app = build_app(Arc::new(services));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(addr = %listener.local_addr()?, dir = %config.data_dir.display(), "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
