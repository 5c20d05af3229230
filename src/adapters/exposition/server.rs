//! HTTP exposition server.
//!
//! One axum router: the telemetry path runs a fresh collection pass per
//! scrape and renders it together with the static registry (build info);
//! the index page links to the telemetry path.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use prometheus::proto::MetricFamily;
use prometheus::{Encoder, IntGauge, Opts, Registry, TextEncoder};
use tracing::{error, info};

use super::encode::to_metric_families;
use crate::usecases::PowerAdminCollector;

/// Shared state behind the exposition routes.
pub struct AppState {
    pub collector: PowerAdminCollector,
    pub registry: Registry,
    pub telemetry_path: String,
}

/// Registry of static metrics scraped alongside the per-pass samples.
pub fn build_registry() -> anyhow::Result<Registry> {
    let registry = Registry::new();
    let build_info = IntGauge::with_opts(
        Opts::new(
            "poweradmin_exporter_build_info",
            "Build information of the exporter",
        )
        .const_label("version", env!("CARGO_PKG_VERSION")),
    )?;
    build_info.set(1);
    registry.register(Box::new(build_info))?;
    Ok(registry)
}

/// Build the exposition router.
pub fn router(state: Arc<AppState>) -> Router {
    let telemetry_path = state.telemetry_path.clone();
    Router::new()
        .route(&telemetry_path, get(metrics_handler))
        .route("/", get(index_handler))
        .with_state(state)
}

/// Bind and serve until SIGINT.
pub async fn serve(listen_address: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen_address).await?;
    info!(address = %listen_address, "Beginning to serve");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;
    Ok(())
}

async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let samples = state.collector.collect().await;
    let mut families = to_metric_families(&samples);
    families.extend(state.registry.gather());
    encode_response(&families)
}

/// Render families as a text-format response; an encoding failure is a
/// failed scrape (500), never an empty-but-healthy 200.
fn encode_response(families: &[MetricFamily]) -> Response {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    match encoder.encode(families, &mut buffer) {
        Ok(()) => ([(CONTENT_TYPE, encoder.format_type().to_string())], buffer).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(format!(
        "<html>\n\
         <head><title>PowerAdmin Exporter</title></head>\n\
         <body>\n\
         <h1>PowerAdmin Exporter</h1>\n\
         <p><a href=\"{}\">Metrics</a></p>\n\
         </body>\n\
         </html>",
        state.telemetry_path
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sample;

    #[test]
    fn test_encode_success_returns_ok_with_text_format() {
        let families = to_metric_families(&[Sample::observation(
            "ping_status".to_string(),
            1.0,
            "Servers/Devices^Live",
            "FXSERVER",
        )]);
        let response = encode_response(&families);
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get(CONTENT_TYPE).unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/plain"));
    }

    #[test]
    fn test_encode_failure_returns_server_error() {
        // the text encoder rejects a family with no metrics
        let empty = MetricFamily::default();
        let response = encode_response(&[empty]);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
