//! # Network Module
//!
//! The four supported networks and their fixed resonance parameters. A
//! "network" here is only a label that selects a resonance tuple; nothing
//! in this crate talks to a ledger.
//!
//! ```text
//! resonance.rs — Network identifiers and the static resonance table
//! timing.rs    — Phase-alignment timing: the next resonance peak
//! ```
//!
//! Unsupported identifiers are rejected with [`NetworkError::UnsupportedNetwork`].
//! Nothing falls back to a default network.

pub mod resonance;
pub mod timing;

use thiserror::Error;

pub use resonance::{Network, Resonance};
pub use timing::{optimal_execution, optimal_execution_for, time_to_peak};

/// Errors raised when resolving a network identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// The identifier is not one of the supported tickers.
    #[error("network not found: {network}")]
    UnsupportedNetwork { network: String },
}
