//! Canonical signing message, signed records and verification.
//!
//! The signing message is the UTF-8 text
//!
//! ```text
//! amount|from|to|purpose|timestamp
//! ```
//!
//! with `amount` rendered by [`canonical_real`] (`"0"` when absent) and any
//! other absent field left empty. Field order and separator are the wire
//! contract; changing either invalidates every existing signature.
//!
//! Verification uses only the signed record: the MAC key is the hex in its
//! `public_key` field. That detects corruption in transit. It does not
//! authenticate the signer, since anyone who can rewrite the record can
//! rewrite the key too.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::SIGNING_FIELD_SEPARATOR;
use crate::crypto::verify_hmac_sha512;
use crate::transaction::{canonical_real, Transaction};

/// A transaction plus the fields added by signing.
///
/// On the wire the transaction's fields sit at the top level next to
/// `signature`, `public_key` and `network`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,

    /// Hex HMAC-SHA512 tag over the signing message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,

    /// Hex of the symmetric MAC key used to produce `signature`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,

    /// Ticker of the network the key belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

/// Why a signed record failed verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationFailure {
    #[error("signed record is missing `{0}`")]
    MissingField(&'static str),

    #[error("`{0}` is not valid hex")]
    MalformedHex(&'static str),

    #[error("signature does not match the message")]
    SignatureMismatch,
}

/// The canonical message bytes for `tx`.
pub fn serialize_transaction(tx: &Transaction) -> Vec<u8> {
    let amount = match tx.amount {
        Some(amount) => canonical_real(amount),
        None => "0".to_string(),
    };
    let fields = [
        amount.as_str(),
        tx.from.as_str(),
        tx.to.as_str(),
        tx.purpose.as_deref().unwrap_or(""),
        tx.timestamp.as_deref().unwrap_or(""),
    ];
    fields.join(SIGNING_FIELD_SEPARATOR).into_bytes()
}

/// Check a signed record, reporting why it fails.
///
/// # Errors
///
/// A [`VerificationFailure`] describing the first problem found.
pub fn check_transaction(signed: &SignedTransaction) -> Result<(), VerificationFailure> {
    let signature = signed
        .signature
        .as_deref()
        .ok_or(VerificationFailure::MissingField("signature"))?;
    let public_key = signed
        .public_key
        .as_deref()
        .ok_or(VerificationFailure::MissingField("public_key"))?;

    let tag = hex::decode(signature).map_err(|_| VerificationFailure::MalformedHex("signature"))?;
    let key = hex::decode(public_key).map_err(|_| VerificationFailure::MalformedHex("public_key"))?;

    let message = serialize_transaction(&signed.transaction);
    if verify_hmac_sha512(&key, &message, &tag) {
        Ok(())
    } else {
        Err(VerificationFailure::SignatureMismatch)
    }
}

/// Verify a signed record. Never fails: malformed records are `false`.
pub fn verify_transaction(signed: &SignedTransaction) -> bool {
    match check_transaction(signed) {
        Ok(()) => true,
        Err(reason) => {
            debug!(%reason, "signed transaction failed verification");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionBuilder;

    #[test]
    fn message_layout() {
        let tx = TransactionBuilder::new()
            .amount(100.0)
            .sender("alice")
            .receiver("bob")
            .purpose("payment for services")
            .timestamp("2024-01-01T10:00:00Z")
            .build();
        assert_eq!(
            serialize_transaction(&tx),
            b"100.0|alice|bob|payment for services|2024-01-01T10:00:00Z".to_vec()
        );
    }

    #[test]
    fn absent_fields_serialize_empty_and_amount_zero() {
        assert_eq!(serialize_transaction(&Transaction::default()), b"0||||".to_vec());
    }

    #[test]
    fn id_and_priority_are_not_signed() {
        let a = TransactionBuilder::new().id("a").amount(1.0).time_priority(0.1).build();
        let b = TransactionBuilder::new().id("b").amount(1.0).time_priority(0.9).build();
        assert_eq!(serialize_transaction(&a), serialize_transaction(&b));
    }

    #[test]
    fn missing_signature_is_reported() {
        let signed = SignedTransaction {
            transaction: Transaction::default(),
            signature: None,
            public_key: Some("00".into()),
            network: None,
        };
        assert_eq!(
            check_transaction(&signed),
            Err(VerificationFailure::MissingField("signature"))
        );
        assert!(!verify_transaction(&signed));
    }

    #[test]
    fn bad_hex_is_reported() {
        let signed = SignedTransaction {
            transaction: Transaction::default(),
            signature: Some("zz".into()),
            public_key: Some("00".into()),
            network: None,
        };
        assert_eq!(
            check_transaction(&signed),
            Err(VerificationFailure::MalformedHex("signature"))
        );
    }

    #[test]
    fn flattened_wire_shape() {
        let signed = SignedTransaction {
            transaction: TransactionBuilder::new().amount(5.0).sender("a").build(),
            signature: Some("ab".into()),
            public_key: Some("cd".into()),
            network: Some("XLM".into()),
        };
        let json = serde_json::to_value(&signed).unwrap();
        assert_eq!(json["amount"], 5.0);
        assert_eq!(json["from"], "a");
        assert_eq!(json["signature"], "ab");
        assert_eq!(json["network"], "XLM");

        let back: SignedTransaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, signed);
    }
}
