use anyhow::{Context, Result};
use axum::{routing::get, Router};
use http::{header, StatusCode};
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};
use prometheus::{Encoder, TextEncoder};
use std::net::SocketAddr;
use tokio::sync::watch;
use tracing::error;

pub static SIGNIN_METRICS: Lazy<SignInMetrics> = Lazy::new(SignInMetrics::new);

pub struct SignInMetrics {
    result: IntCounterVec,
    sheet_append_failed: IntCounter,
}

impl SignInMetrics {
    fn new() -> Self {
        Self {
            result: register_int_counter_vec!("signin_result", "Sign-in results", &["status"])
                .expect("failed to register signin_result"),
            sheet_append_failed: register_int_counter!(
                "sheet_append_failed",
                "Failed attendance sheet appends"
            )
            .expect("failed to register sheet_append_failed"),
        }
    }

    pub fn observe(&self, status: StatusCode) {
        self.result.with_label_values(&[status.as_str()]).inc();
    }

    pub fn sheet_append_failed(&self) {
        self.sheet_append_failed.inc();
    }
}

async fn metrics() -> (StatusCode, [(header::HeaderName, String); 1], Vec<u8>) {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
        error!(error = %e, "Failed to encode metrics");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain".to_string())],
            Vec::new(),
        );
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
}

/// Serves `/metrics` until `shutdown_rx` fires.
pub async fn serve(addr: SocketAddr, mut shutdown_rx: watch::Receiver<()>) -> Result<()> {
    let app = Router::new().route("/metrics", get(metrics));

    axum::Server::try_bind(&addr)
        .with_context(|| format!("Failed to bind metrics listener {}", addr))?
        .serve(app.into_make_service())
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
        })
        .await
        .context("Metrics server failed")
}
