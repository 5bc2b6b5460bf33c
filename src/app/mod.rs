use crate::app::state::AppState;
use crate::roster::HttpRoster;
use anyhow::{Context, Result};
use futures_util::StreamExt;
use signal_hook::consts::TERM_SIGNALS;
use signal_hook_tokio::Signals;
use tokio::sync::watch;
use tracing::{error, info};

pub mod api;
pub mod error;
pub mod metrics;
pub mod router;
pub mod state;

pub async fn run() -> Result<()> {
    let config = crate::config::load().context("Failed to load config")?;
    info!("App config: {:?}", config);

    let _sentry = config
        .sentry
        .as_ref()
        .map(svc_error::extension::sentry::init);

    let roster = HttpRoster::new(config.roster.clone(), config.sheet.clone());
    let state = AppState::new(config.clone(), roster);

    let (shutdown_tx, shutdown_rx) = watch::channel(());

    let metrics_server = tokio::spawn(metrics::serve(
        config.metrics_listener_address,
        shutdown_rx.clone(),
    ));

    let mut server_shutdown_rx = shutdown_rx;
    let server = axum::Server::try_bind(&config.listener_address)
        .with_context(|| format!("Failed to bind {}", config.listener_address))?
        .serve(router::router(state).into_make_service())
        .with_graceful_shutdown(async move {
            let _ = server_shutdown_rx.changed().await;
        });
    let server = tokio::spawn(server);

    info!("Server is listening on {}", config.listener_address);

    let mut signals = Signals::new(TERM_SIGNALS).context("Failed to register signal handlers")?;
    let signals_handle = signals.handle();
    signals.next().await;
    info!("Received signal, shutting down");

    signals_handle.close();
    let _ = shutdown_tx.send(());

    if let Err(e) = server.await.context("Server task panicked")? {
        error!(error = %e, "Server failed");
    }

    metrics_server
        .await
        .context("Metrics server task panicked")??;

    info!("Server stopped");
    Ok(())
}
