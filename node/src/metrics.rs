//! # Prometheus Metrics
//!
//! Operational metrics for the node, scraped at `/metrics` on the metrics
//! port. Everything lives in a dedicated [`prometheus::Registry`] with the
//! `energy` prefix, so nothing collides with the default global registry.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;

/// Holds all Prometheus metric handles for the node.
///
/// The handles are cheap to clone and share one underlying registry.
#[derive(Clone)]
pub struct NodeMetrics {
    registry: Registry,
    /// Transactions folded into the energy field, labelled by network.
    pub transactions_processed_total: IntCounterVec,
    /// Requests rejected before touching the field (bad record or network).
    pub transactions_rejected_total: IntCounter,
    /// Signed records issued by `/sign`.
    pub signatures_issued_total: IntCounter,
    /// `/verify` calls that came back invalid.
    pub verifications_failed_total: IntCounter,
    /// Current length of the field's history log.
    pub history_length: IntGauge,
    /// Wall time of one `/process-transactions` request.
    pub processing_latency_seconds: Histogram,
}

impl Default for NodeMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeMetrics {
    /// Creates and registers all metrics. Call once at startup.
    pub fn new() -> Self {
        let registry = Registry::new_custom(Some("energy".into()), None)
            .expect("failed to create prometheus registry");

        let transactions_processed_total = IntCounterVec::new(
            Opts::new(
                "transactions_processed_total",
                "Total number of transactions folded into the energy field",
            ),
            &["network"],
        )
        .expect("metric creation");
        registry
            .register(Box::new(transactions_processed_total.clone()))
            .expect("metric registration");

        let transactions_rejected_total = IntCounter::new(
            "transactions_rejected_total",
            "Total number of processing requests rejected by validation",
        )
        .expect("metric creation");
        registry
            .register(Box::new(transactions_rejected_total.clone()))
            .expect("metric registration");

        let signatures_issued_total =
            IntCounter::new("signatures_issued_total", "Total number of records signed")
                .expect("metric creation");
        registry
            .register(Box::new(signatures_issued_total.clone()))
            .expect("metric registration");

        let verifications_failed_total = IntCounter::new(
            "verifications_failed_total",
            "Total number of signed records that failed verification",
        )
        .expect("metric creation");
        registry
            .register(Box::new(verifications_failed_total.clone()))
            .expect("metric registration");

        let history_length = IntGauge::new(
            "history_length",
            "Number of entries in the energy field history log",
        )
        .expect("metric creation");
        registry
            .register(Box::new(history_length.clone()))
            .expect("metric registration");

        let processing_latency_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "processing_latency_seconds",
                "Latency of transaction processing requests in seconds",
            )
            .buckets(vec![
                0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
            ]),
        )
        .expect("metric creation");
        registry
            .register(Box::new(processing_latency_seconds.clone()))
            .expect("metric registration");

        Self {
            registry,
            transactions_processed_total,
            transactions_rejected_total,
            signatures_issued_total,
            verifications_failed_total,
            history_length,
            processing_latency_seconds,
        }
    }

    /// Encodes all registered metrics into the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

/// Shared metrics state passed to axum handlers.
pub type SharedMetrics = Arc<NodeMetrics>;

/// Axum handler that renders `/metrics` in Prometheus text format.
pub async fn metrics_handler(
    axum::extract::State(metrics): axum::extract::State<SharedMetrics>,
) -> impl IntoResponse {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}
