use std::sync::Arc;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use telecom_scraper::{
    config::Config,
    api::create_router,
    scraper::HttpScraper,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,telecom_scraper=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load configuration")?;
    let server_addr = config.server_addr;

    let scraper = HttpScraper::new(&config)?;
    let app_state = AppState {
        scraper: Arc::new(scraper),
    };

    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr)
        .await
        .with_context(|| format!("Failed to bind {}", server_addr))?;

    tracing::info!(%server_addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
