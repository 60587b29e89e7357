//! # Transaction Module
//!
//! The record every other module consumes. Scoring reads it, the energy
//! field logs it, the vault serializes and tags it, and the compliance
//! mapper turns it into an ISO 20022 message.
//!
//! ## Architecture
//!
//! ```text
//! types.rs   — Transaction record, validation errors, canonical real formatting
//! builder.rs — Fluent TransactionBuilder for constructing records in code
//! ```
//!
//! ## Design Decisions
//!
//! - Records are never mutated after construction. Signing produces a new
//!   [`crate::vault::SignedTransaction`] that embeds a copy.
//! - `amount` is `Option<f64>`. Scoring requires it and rejects negative
//!   or non-finite values; signing substitutes `0` when it is absent.
//! - Amounts are reals, not integer minor units. This engine scores and
//!   tags transactions; it does not move balances.

pub mod builder;
pub mod types;

pub use builder::TransactionBuilder;
pub use types::{canonical_real, Transaction, TransactionError};
