//! Dimensional reduction: transaction → scalar energy.
//!
//! ```text
//! score = ln(amount + 1) · 0.01 + time_priority · 0.1 + intent(purpose)
//! ```
//!
//! `intent` starts at 0.5 and moves 0.1 per intent word found in the
//! lowercased purpose: down for positive words, up for negative ones. Each
//! word counts once however often it appears, different words compound,
//! and matching is plain substring search (`"prefee"` matches `fee`). The
//! result is clamped to `[0.1, 1.0]`.

use crate::config::{
    AMOUNT_WEIGHT, BASE_INTENT, INTENT_STEP, MAX_INTENT, MIN_INTENT, NEGATIVE_INTENT_WORDS,
    POSITIVE_INTENT_WORDS, TIME_PRIORITY_WEIGHT,
};
use crate::transaction::{Transaction, TransactionError};

/// Intent energy of a purpose string.
///
/// An empty purpose returns exactly [`BASE_INTENT`].
pub fn intent_energy(purpose: &str) -> f64 {
    if purpose.is_empty() {
        return BASE_INTENT;
    }

    let lowered = purpose.to_lowercase();
    let mut adjustment = 0.0;
    for word in POSITIVE_INTENT_WORDS {
        if lowered.contains(word) {
            adjustment -= INTENT_STEP;
        }
    }
    for word in NEGATIVE_INTENT_WORDS {
        if lowered.contains(word) {
            adjustment += INTENT_STEP;
        }
    }

    (BASE_INTENT + adjustment).clamp(MIN_INTENT, MAX_INTENT)
}

/// Energy signature (score) of a transaction.
///
/// # Errors
///
/// Whatever [`Transaction::validated_amount`] rejects (a missing, negative
/// or non-finite amount) and whatever
/// [`Transaction::validated_time_priority`] rejects (a non-finite priority
/// or one outside `[0, 1]`). A successful score is finite and non-negative.
pub fn energy_signature(tx: &Transaction) -> Result<f64, TransactionError> {
    let amount = tx.validated_amount()?;
    let base = (amount + 1.0).ln() * AMOUNT_WEIGHT;
    let time = tx.validated_time_priority()? * TIME_PRIORITY_WEIGHT;
    let intent = intent_energy(tx.purpose_str());
    Ok(base + time + intent)
}
