use analyst::config::Config;
use tracing::info;

mod api;
mod chat;
mod error;
mod state;
mod telemetry;
mod vision;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Initialize Sentry if SENTRY_DSN is set
    let _sentry_guard = telemetry::init_sentry_guard(config.sentry_dsn.as_deref());
    telemetry::init_tracing();

    let app_state = state::AppState::new(&config).await?;
    let app = api::create_api(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("Backend running on http://{}", config.bind);
    axum::serve(listener, app).await?;
    Ok(())
}
