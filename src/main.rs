mod app;
mod body;
mod config;
mod cors;
mod db;
mod error;
mod state;
mod static_files;
mod users;

use crate::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "usuarios=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    let addr = config.socket_addr()?;
    tracing::info!(
        public_dir = %config.public_dir.display(),
        expose_error_details = config.expose_error_details,
        "configuration loaded"
    );

    // The database is connected lazily by the first query.
    let app_state = AppState::init(config);
    let store = app_state.store.clone();

    app::serve(app::build_app(app_state), addr).await?;

    store.close().await;
    tracing::info!("server stopped");
    Ok(())
}
