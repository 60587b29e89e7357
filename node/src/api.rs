//! # REST API
//!
//! Builds the axum router that exposes the energy engine and the vault over
//! HTTP. All endpoints share application state through axum's `State`
//! extractor.
//!
//! ## Endpoints
//!
//! | Method | Path                          | Description                          |
//! |--------|-------------------------------|--------------------------------------|
//! | GET    | `/`                           | Service status                       |
//! | GET    | `/health`                     | Liveness probe                       |
//! | POST   | `/process-transactions`       | Score, time and fold transactions    |
//! | GET    | `/network-resonance/:network` | Resonance and next optimal instant   |
//! | GET    | `/energy-field`               | Field snapshot                       |
//! | GET    | `/supported-networks`         | Supported network tickers            |
//! | POST   | `/batch`                      | Group transactions by energy         |
//! | POST   | `/sign`                       | Sign a transaction for a network     |
//! | POST   | `/verify`                     | Verify a signed record               |
//!
//! Errors come back as `{"error": "..."}` with 404 for an unsupported
//! network and 422 for a transaction that cannot be scored.

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use energy_protocol::compliance::{
    generate_compliance_report, ComplianceReport, Iso20022Mapper, Iso20022Message,
};
use energy_protocol::energy::{
    batch_transactions, EnergyProcessor, EnergySnapshot, ProcessError, ProcessingResult,
};
use energy_protocol::network::{optimal_execution_for, Network, NetworkError, Resonance};
use energy_protocol::transaction::{Transaction, TransactionError};
use energy_protocol::vault::{check_transaction, SignedTransaction, Vault, VaultError};

use crate::metrics::SharedMetrics;

// ---------------------------------------------------------------------------
// Application State
// ---------------------------------------------------------------------------

/// Shared application state available to all request handlers.
///
/// Cheap to clone: everything sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The node's reported version string.
    pub version: String,
    /// The energy engine. One field per node.
    pub processor: Arc<EnergyProcessor>,
    /// Signing vault.
    pub vault: Arc<Vault>,
    /// ISO 20022 mapper attached to processing results.
    pub mapper: Iso20022Mapper,
    /// Reference to Prometheus metrics for in-handler recording.
    pub metrics: SharedMetrics,
}

// ---------------------------------------------------------------------------
// Router Construction
// ---------------------------------------------------------------------------

/// Builds the full axum [`Router`] with all API routes, CORS, and tracing.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/process-transactions", post(process_handler))
        .route("/network-resonance/:network", get(resonance_handler))
        .route("/energy-field", get(energy_field_handler))
        .route("/supported-networks", get(supported_networks_handler))
        .route("/batch", post(batch_handler))
        .route("/sign", post(sign_handler))
        .route("/verify", post(verify_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Generic error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A handler failure: status code plus message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<NetworkError> for ApiError {
    fn from(err: NetworkError) -> Self {
        Self::new(StatusCode::NOT_FOUND, err.to_string())
    }
}

impl From<TransactionError> for ApiError {
    fn from(err: TransactionError) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
    }
}

impl From<ProcessError> for ApiError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::Transaction(e) => e.into(),
            ProcessError::Network(e) => e.into(),
        }
    }
}

impl From<VaultError> for ApiError {
    fn from(err: VaultError) -> Self {
        match err {
            VaultError::Network(e) => e.into(),
            VaultError::EntropySourceFailure(_) | VaultError::InvalidKeyLength => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Request / Response Types
// ---------------------------------------------------------------------------

/// Service status returned by `GET /`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub transaction_count: usize,
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /process-transactions`.
#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    pub transactions: Vec<Transaction>,
    pub network: String,
    #[serde(default = "default_compliance_level")]
    pub compliance_level: String,
}

fn default_compliance_level() -> String {
    "strict".to_string()
}

/// One processed transaction with its ISO 20022 projection.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessedTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(flatten)]
    pub result: ProcessingResult,
    pub iso20022: Iso20022Message,
}

/// Response of `POST /process-transactions`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub results: Vec<ProcessedTransaction>,
    pub energy_field_snapshot: EnergySnapshot,
    pub compliance_report: ComplianceReport,
    pub compliance_level: String,
}

/// Response of `GET /network-resonance/:network`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResonanceResponse {
    pub network: Network,
    pub resonance: Resonance,
    pub optimal_timing: DateTime<Utc>,
}

/// Response of `GET /supported-networks`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SupportedNetworksResponse {
    pub networks: Vec<Network>,
    pub count: usize,
}

/// Body of `POST /batch`.
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub transactions: Vec<Transaction>,
    /// Overrides the node's configured threshold.
    pub threshold: Option<f64>,
}

/// Response of `POST /batch`.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchResponse {
    pub batches: Vec<Vec<Transaction>>,
    pub count: usize,
    pub threshold: f64,
}

/// Body of `POST /sign`.
#[derive(Debug, Deserialize)]
pub struct SignRequest {
    pub transaction: Transaction,
    pub network: String,
}

/// Response of `POST /verify`.
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /` — service status.
async fn root_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "active".into(),
        service: "energy-node".into(),
        version: state.version.clone(),
        transaction_count: state.processor.field().transaction_count(),
        timestamp: Utc::now(),
    })
}

/// `GET /health` — returns 200 if the node is alive.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// `POST /process-transactions` — process a batch for one network.
///
/// The network is resolved first and every transaction is scored before
/// any is processed, so a rejected request leaves the field untouched.
async fn process_handler(
    State(state): State<AppState>,
    Json(req): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let _timer = state.metrics.processing_latency_seconds.start_timer();

    let network = Network::lookup(&req.network).map_err(|e| {
        state.metrics.transactions_rejected_total.inc();
        ApiError::from(e)
    })?;

    for (index, tx) in req.transactions.iter().enumerate() {
        if let Err(e) = state.processor.score(tx) {
            state.metrics.transactions_rejected_total.inc();
            return Err(ApiError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("transaction {index}: {e}"),
            ));
        }
    }

    let now = Utc::now();
    let mut results = Vec::with_capacity(req.transactions.len());
    for tx in &req.transactions {
        let iso20022 = state.mapper.to_iso20022(tx, now);
        let result = state.processor.process_at(tx, network.as_str(), now)?;
        results.push(ProcessedTransaction {
            transaction_id: tx.id.clone(),
            result,
            iso20022,
        });
    }

    state
        .metrics
        .transactions_processed_total
        .with_label_values(&[network.as_str()])
        .inc_by(results.len() as u64);
    let snapshot = state.processor.snapshot();
    state
        .metrics
        .history_length
        .set(snapshot.transaction_count as i64);

    tracing::info!(
        network = %network,
        count = results.len(),
        "processed transaction batch"
    );

    Ok(Json(ProcessResponse {
        compliance_report: generate_compliance_report(results.len(), now),
        results,
        energy_field_snapshot: snapshot,
        compliance_level: req.compliance_level,
    }))
}

/// `GET /network-resonance/:network` — resonance parameters and the next
/// optimal execution instant.
async fn resonance_handler(Path(network): Path<String>) -> Result<Json<ResonanceResponse>, ApiError> {
    let network = Network::lookup(&network)?;
    Ok(Json(ResonanceResponse {
        network,
        resonance: network.resonance(),
        optimal_timing: optimal_execution_for(network, Utc::now()),
    }))
}

/// `GET /energy-field` — current field snapshot.
async fn energy_field_handler(State(state): State<AppState>) -> Json<EnergySnapshot> {
    Json(state.processor.snapshot())
}

/// `GET /supported-networks`.
async fn supported_networks_handler() -> Json<SupportedNetworksResponse> {
    Json(SupportedNetworksResponse {
        networks: Network::ALL.to_vec(),
        count: Network::ALL.len(),
    })
}

/// `POST /batch` — group transactions by energy. Does not touch the field.
async fn batch_handler(
    State(state): State<AppState>,
    Json(req): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, ApiError> {
    let threshold = req.threshold.unwrap_or_else(|| state.processor.threshold());
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(ApiError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("threshold must be a positive number, got {threshold}"),
        ));
    }

    let batches = batch_transactions(&req.transactions, threshold)?;
    Ok(Json(BatchResponse {
        count: batches.len(),
        batches,
        threshold,
    }))
}

/// `POST /sign` — sign a transaction with the node's vault.
async fn sign_handler(
    State(state): State<AppState>,
    Json(req): Json<SignRequest>,
) -> Result<Json<SignedTransaction>, ApiError> {
    let signed = state.vault.sign(&req.transaction, &req.network)?;
    state.metrics.signatures_issued_total.inc();
    Ok(Json(signed))
}

/// `POST /verify` — verify a signed record. Any JSON body gets a 200; a
/// record whose fields have the wrong shape is reported as invalid.
async fn verify_handler(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Json<VerifyResponse> {
    let outcome = serde_json::from_value::<SignedTransaction>(body)
        .map_err(|err| format!("malformed signed record: {err}"))
        .and_then(|signed| check_transaction(&signed).map_err(|reason| reason.to_string()));

    match outcome {
        Ok(()) => Json(VerifyResponse {
            valid: true,
            reason: None,
        }),
        Err(reason) => {
            state.metrics.verifications_failed_total.inc();
            tracing::warn!(%reason, "signed record failed verification");
            Json(VerifyResponse {
                valid: false,
                reason: Some(reason),
            })
        }
    }
}
