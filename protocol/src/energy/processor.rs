//! Transaction processing: score → timing → quantum state → field update.
//!
//! The four steps run in order for every call. Scoring and network
//! resolution both happen before the field is touched, so a transaction
//! that fails either one leaves no trace in the field or the history log.
//!
//! `process` is not idempotent. Submitting the same transaction twice
//! counts it twice; deduplication is the caller's job.

use chrono::{DateTime, Utc};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::DEFAULT_BATCH_THRESHOLD;
use crate::network::{optimal_execution_for, Network, Resonance};
use crate::transaction::{Transaction, TransactionError};

use super::batch::batch_transactions;
use super::field::{EnergyField, EnergySnapshot};
use super::quantum::quantum_state;
use super::scoring::energy_signature;
use super::ProcessError;

/// Outcome of processing one transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// The transaction's energy signature.
    #[serde(rename = "energy_signature")]
    pub score: f64,
    /// Next resonance peak of the target network.
    #[serde(rename = "optimal_execution")]
    pub optimal_time: DateTime<Utc>,
    pub quantum_state: Complex64,
    pub network: Network,
    pub processed_at: DateTime<Utc>,
    /// Field cell the state was added to.
    pub coordinates: (usize, usize),
}

/// The energy engine: one field, one batching threshold.
///
/// Construct one per process (or per test) and share it with `Arc`.
#[derive(Debug)]
pub struct EnergyProcessor {
    field: EnergyField,
    threshold: f64,
}

impl Default for EnergyProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl EnergyProcessor {
    /// A processor with a fresh field and the default batch threshold.
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_BATCH_THRESHOLD)
    }

    /// A processor with a fresh field and a custom batch threshold.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            field: EnergyField::new(),
            threshold,
        }
    }

    /// Process `tx` for `network` at the current instant.
    ///
    /// # Errors
    ///
    /// - [`ProcessError::Transaction`] if the transaction cannot be scored.
    /// - [`ProcessError::Network`] if `network` is not supported.
    ///
    /// The field is untouched on error.
    pub fn process(&self, tx: &Transaction, network: &str) -> Result<ProcessingResult, ProcessError> {
        self.process_at(tx, network, Utc::now())
    }

    /// [`process`](Self::process) against an explicit clock reading.
    pub fn process_at(
        &self,
        tx: &Transaction,
        network: &str,
        now: DateTime<Utc>,
    ) -> Result<ProcessingResult, ProcessError> {
        let score = energy_signature(tx)?;

        let network = Network::lookup(network).map_err(|err| {
            warn!(%err, "rejecting transaction for unsupported network");
            err
        })?;
        let optimal_time = optimal_execution_for(network, now);

        let state = quantum_state(score);
        let coordinates = self.field.update_at(tx, score, state, now);

        debug!(
            network = %network,
            score,
            x = coordinates.0,
            y = coordinates.1,
            "transaction folded into energy field"
        );

        Ok(ProcessingResult {
            score,
            optimal_time,
            quantum_state: state,
            network,
            processed_at: now,
            coordinates,
        })
    }

    /// Score a transaction without touching the field.
    pub fn score(&self, tx: &Transaction) -> Result<f64, TransactionError> {
        energy_signature(tx)
    }

    /// Batch with the processor's configured threshold.
    pub fn batch(&self, transactions: &[Transaction]) -> Result<Vec<Vec<Transaction>>, TransactionError> {
        batch_transactions(transactions, self.threshold)
    }

    /// Point-in-time field aggregate.
    pub fn snapshot(&self) -> EnergySnapshot {
        self.field.snapshot()
    }

    /// Direct access to the field, for history and cell reads.
    pub fn field(&self) -> &EnergyField {
        &self.field
    }

    /// Configured batch threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Supported networks with their resonance parameters.
    pub fn supported_networks(&self) -> Vec<(Network, Resonance)> {
        Network::ALL
            .into_iter()
            .map(|network| (network, network.resonance()))
            .collect()
    }
}
