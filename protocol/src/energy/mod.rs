//! # Energy Engine
//!
//! Turns a transaction into a scalar score, a complex "quantum state" and a
//! cell in a shared 1000×1000 accumulator field.
//!
//! ## Pipeline
//!
//! ```text
//!   Transaction
//!       │
//!       ▼
//!   scoring.rs    ── energy_signature(tx) → f64
//!       │
//!       ├──▶ network::timing  ── next resonance peak
//!       ▼
//!   quantum.rs    ── score → s·e^(i·2π·s)
//!       │
//!       ▼
//!   field.rs      ── cell += state, history.push(entry)
//! ```
//!
//! `processor.rs` runs the pipeline; `batch.rs` groups transactions by score
//! proximity without touching the field.

pub mod batch;
pub mod field;
pub mod processor;
pub mod quantum;
pub mod scoring;

use thiserror::Error;

use crate::network::NetworkError;
use crate::transaction::TransactionError;

pub use batch::{batch_by_score, batch_transactions};
pub use field::{EnergyField, EnergySnapshot, FieldEntry};
pub use processor::{EnergyProcessor, ProcessingResult};
pub use quantum::quantum_state;
pub use scoring::{energy_signature, intent_energy};

/// Why a transaction could not be processed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}
