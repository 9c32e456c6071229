//! `datebot run`: connect to the gateway and serve until a shutdown signal.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use datebot_infra::config::{load_config, load_token};
use datebot_infra::discord::build_client;

use crate::state::AppState;

pub async fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)
        .await
        .with_context(|| format!("invalid configuration ({})", config_path.display()))?;
    let token = load_token(|key| std::env::var(key).ok())?;

    let state = AppState::init(&config, &token);
    let sweeper = Arc::clone(&state.sessions)
        .spawn_sweeper(config.sweep_interval(), state.shutdown.child_token());

    let mut client = build_client(&token, state.handler())
        .await
        .context("failed to build gateway client")?;
    let shard_manager = Arc::clone(&client.shard_manager);

    info!(
        channel_id = ?config.channel_id,
        role_id = ?config.role_id,
        nudge_delay_secs = config.nudge_delay_secs,
        "connecting to Discord"
    );

    let outcome = tokio::select! {
        result = client.start() => result.context("gateway connection failed"),
        () = shutdown_signal() => {
            info!("shutdown signal received");
            Ok(())
        }
    };

    state.shutdown.cancel();
    shard_manager.shutdown_all().await;
    if let Err(e) = sweeper.await {
        error!(error = %e, "session sweeper panicked");
    }
    info!(open_selections = state.sessions.len(), "stopped");

    outcome
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
