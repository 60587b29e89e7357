// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Energy Protocol — Core Library
//!
//! Scores financial transactions, folds them into a shared complex-valued
//! field, picks an execution instant per network, and signs the records
//! with keyed hashes.
//!
//! None of the names mean what they sound like. The "quantum state" is a
//! complex number computed from a float, the "networks" are four labels with
//! a sine wave each, and the "public key" on a signed record is a symmetric
//! MAC key. The behavior is exact and deterministic all the same.
//!
//! ## Architecture
//!
//! - **config** — Protocol constants: weights, wordlists, field size, tags.
//! - **crypto** — SHA-2, BLAKE3 coordinate hash, HMAC-SHA512.
//! - **transaction** — The transaction record, its builder and validation.
//! - **network** — Resonance table and phase-alignment timing.
//! - **energy** — Scoring, quantum state, energy field, batching, processor.
//! - **vault** — Seed, per-network keys, sign and verify.
//! - **compliance** — ISO 20022 mapping and batch reports.
//!
//! ## Quick start
//!
//! ```
//! use energy_protocol::energy::EnergyProcessor;
//! use energy_protocol::transaction::TransactionBuilder;
//! use energy_protocol::vault::Vault;
//!
//! let tx = TransactionBuilder::new()
//!     .id("tx_001")
//!     .amount(100.0)
//!     .sender("alice")
//!     .receiver("bob")
//!     .purpose("payment for services")
//!     .build();
//!
//! let processor = EnergyProcessor::new();
//! let result = processor.process(&tx, "XRP").unwrap();
//! assert!((result.score - 0.4961512051684126).abs() < 1e-9);
//!
//! let vault = Vault::from_seed("demo seed");
//! let signed = vault.sign(&tx, "XRP").unwrap();
//! assert!(vault.verify(&signed));
//! ```

pub mod compliance;
pub mod config;
pub mod crypto;
pub mod energy;
pub mod network;
pub mod transaction;
pub mod vault;
