//! The transaction record and its validation errors.
//!
//! A [`Transaction`] is an immutable input to scoring and signing. Only
//! `amount` is required for scoring; every other field is optional and
//! absent fields serialize as nothing at all.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::DEFAULT_TIME_PRIORITY;

// ---------------------------------------------------------------------------
// TransactionError
// ---------------------------------------------------------------------------

/// Validation failures for a transaction record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransactionError {
    /// A required field is absent.
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    /// `amount` is below zero. `ln(amount + 1)` is undefined below −1 and
    /// meaningless below 0, so negative amounts never reach the math.
    #[error("amount must be non-negative, got {amount}")]
    NegativeAmount { amount: f64 },

    /// `amount` is NaN or infinite.
    #[error("amount must be a finite number")]
    NonFiniteAmount,

    /// `time_priority` is NaN or infinite.
    #[error("time_priority must be a finite number")]
    NonFiniteTimePriority,

    /// `time_priority` is outside `[0, 1]`.
    #[error("time_priority must be within [0, 1], got {value}")]
    TimePriorityOutOfRange { value: f64 },
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A financial transaction as submitted by a caller.
///
/// The wire names match the field names (`from` and `to` included). Unknown
/// JSON fields are ignored on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Opaque caller-supplied identifier. Selects the field's y coordinate
    /// when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Transfer amount. Required for scoring; defaults to `0` only inside
    /// the signing message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    /// Sender identifier.
    #[serde(default)]
    pub from: String,

    /// Receiver identifier.
    #[serde(default)]
    pub to: String,

    /// Free-text purpose, scanned for intent words.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,

    /// Caller-supplied timestamp, kept verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Urgency in `[0, 1]`. Defaults to 0.5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_priority: Option<f64>,

    /// ISO 4217 currency code. Only the compliance mapper reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Transaction {
    /// Returns the amount after validation.
    ///
    /// # Errors
    ///
    /// `MissingField` when absent, `NonFiniteAmount` for NaN/∞,
    /// `NegativeAmount` below zero.
    pub fn validated_amount(&self) -> Result<f64, TransactionError> {
        let amount = self
            .amount
            .ok_or(TransactionError::MissingField { field: "amount" })?;
        if !amount.is_finite() {
            return Err(TransactionError::NonFiniteAmount);
        }
        if amount < 0.0 {
            return Err(TransactionError::NegativeAmount { amount });
        }
        Ok(amount)
    }

    /// Time priority, or the default when unset.
    pub fn time_priority_or_default(&self) -> f64 {
        self.time_priority.unwrap_or(DEFAULT_TIME_PRIORITY)
    }

    /// Time priority after validation, the default when unset.
    ///
    /// # Errors
    ///
    /// `NonFiniteTimePriority` for NaN/∞, `TimePriorityOutOfRange` outside
    /// `[0, 1]`.
    pub fn validated_time_priority(&self) -> Result<f64, TransactionError> {
        let value = self.time_priority_or_default();
        if !value.is_finite() {
            return Err(TransactionError::NonFiniteTimePriority);
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(TransactionError::TimePriorityOutOfRange { value });
        }
        Ok(value)
    }

    /// Purpose text, empty when unset.
    pub fn purpose_str(&self) -> &str {
        self.purpose.as_deref().unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Canonical real formatting
// ---------------------------------------------------------------------------

/// Render a real number in its canonical decimal form.
///
/// Shortest round-trip digits, with integral values keeping a trailing
/// `.0` and magnitudes outside `[1e-4, 1e16)` switching to exponent form
/// with a signed, two-digit-minimum exponent:
///
/// | value     | rendered  |
/// |-----------|-----------|
/// | `100.0`   | `100.0`   |
/// | `0.1`     | `0.1`     |
/// | `1e20`    | `1e+20`   |
/// | `1.5e-7`  | `1.5e-07` |
///
/// Both the signing message and the field's fallback coordinate key depend
/// on this exact text.
pub fn canonical_real(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let magnitude = value.abs();
    if (1e-4..1e16).contains(&magnitude) {
        let mut text = format!("{}", value);
        if !text.contains('.') {
            text.push_str(".0");
        }
        return text;
    }

    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}
