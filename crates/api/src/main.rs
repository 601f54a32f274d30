use anyhow::Context;

use warden_api::app::{self, services::AppServices};
use warden_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging comes up before config so that config warnings are emitted.
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    warden_observability::init(&level);

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    if config.database_url != "memory://" {
        tracing::warn!("only the in-memory store is built in; ignoring DATABASE_URL");
    }

    let services = AppServices::in_memory(&config.auth_config(), config.bootstrap_admins.clone())?;
    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
