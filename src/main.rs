use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use charmscrape::config::Config;
use charmscrape::routes::{AppState, configure};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,charmscrape=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let (bind, port) = (config.bind.clone(), config.port);
    tracing::info!(allowed_host = config.allowed_host(), "configuration loaded");

    let state = web::Data::new(AppState::new(config).context("Failed to build HTTP client")?);

    tracing::info!("Starting charmscrape on {}:{}", bind, port);
    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind((bind.as_str(), port))
        .with_context(|| format!("Failed to bind {bind}:{port}"))?
        .run()
        .await
        .context("Server error")?;

    Ok(())
}
