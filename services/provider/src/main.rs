//! Date Provider - Main Entry Point

use std::time::Duration;

use anyhow::Context;
use date_provider::config::Config;
use date_provider::http::{AppState, router};
use date_provider::shutdown::{run_with_graceful_shutdown, wait_for_signal};
use rust_common::{TracingConfig, init_tracing};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("invalid configuration")?;

    init_tracing(
        &TracingConfig::default()
            .with_service_name("date-provider")
            .with_log_level(config.log_level.clone())
            .with_json_output(config.log_json),
    );

    let state = AppState::from_config(&config);
    info!(
        backend = ?config.data_backend,
        data_file = %config.data_file.display(),
        data_present = state.presence.exists(),
        provider_states = config.provider_states_enabled,
        "Starting Date Provider"
    );

    let app = router(state, config.provider_states_enabled);
    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;
    info!("Date Provider listening on {}", listener.local_addr()?);

    run_with_graceful_shutdown(
        listener,
        app,
        wait_for_signal(),
        Duration::from_secs(config.shutdown_timeout_seconds),
    )
    .await?;

    info!("Date Provider stopped");
    Ok(())
}
