//! ISO 20022 field mapping.
//!
//! A flat projection of a [`Transaction`] onto the handful of pacs message
//! fields downstream reporting needs. No XML is produced and no schema
//! validation happens here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::transaction::{canonical_real, Transaction};

/// Customer credit transfer.
pub const PACS_008: &str = "pacs.008.001.08";
/// Payment status report.
pub const PACS_002: &str = "pacs.002.001.10";

/// Currency used when a transaction does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructedAmount {
    pub currency: String,
    pub amount: String,
}

/// The mapped message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Iso20022Message {
    pub message_type: String,
    pub message_id: String,
    pub creation_date_time: DateTime<Utc>,
    pub instructing_agent: String,
    pub instructed_agent: String,
    pub instructed_amount: InstructedAmount,
    pub remittance_information: String,
}

/// Maps transactions to ISO 20022 messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct Iso20022Mapper;

impl Iso20022Mapper {
    pub fn new() -> Self {
        Self
    }

    /// Message type for a purpose. Exact, case-sensitive match; a missing
    /// purpose counts as `payment`.
    pub fn message_type(purpose: Option<&str>) -> &'static str {
        match purpose.unwrap_or("payment") {
            "settlement" => PACS_002,
            _ => PACS_008,
        }
    }

    /// Map `tx` to a message stamped with `now`.
    pub fn to_iso20022(&self, tx: &Transaction, now: DateTime<Utc>) -> Iso20022Message {
        let amount = match tx.amount {
            Some(amount) => canonical_real(amount),
            None => "0".to_string(),
        };

        Iso20022Message {
            message_type: Self::message_type(tx.purpose.as_deref()).to_string(),
            message_id: format!("MSG{}", now.format("%Y%m%d%H%M%S")),
            creation_date_time: now,
            instructing_agent: tx.from.clone(),
            instructed_agent: tx.to.clone(),
            instructed_amount: InstructedAmount {
                currency: tx
                    .currency
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
                amount,
            },
            remittance_information: tx.purpose_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionBuilder;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap()
    }

    #[test]
    fn maps_reference_transaction() {
        let tx = TransactionBuilder::new()
            .amount(100.0)
            .sender("alice")
            .receiver("bob")
            .purpose("payment for services")
            .build();
        let msg = Iso20022Mapper::new().to_iso20022(&tx, now());

        assert_eq!(msg.message_type, PACS_008);
        assert_eq!(msg.message_id, "MSG20240305070809");
        assert_eq!(msg.instructing_agent, "alice");
        assert_eq!(msg.instructed_agent, "bob");
        assert_eq!(
            msg.instructed_amount,
            InstructedAmount {
                currency: "USD".into(),
                amount: "100.0".into()
            }
        );
        assert_eq!(msg.remittance_information, "payment for services");
    }

    #[test]
    fn settlement_maps_to_status_report() {
        assert_eq!(Iso20022Mapper::message_type(Some("settlement")), PACS_002);
        assert_eq!(Iso20022Mapper::message_type(Some("transfer")), PACS_008);
        assert_eq!(Iso20022Mapper::message_type(Some("Settlement")), PACS_008);
        assert_eq!(Iso20022Mapper::message_type(None), PACS_008);
    }

    #[test]
    fn currency_and_amount_defaults() {
        let tx = TransactionBuilder::new().currency("EUR").build();
        let msg = Iso20022Mapper::new().to_iso20022(&tx, now());
        assert_eq!(msg.instructed_amount.currency, "EUR");
        assert_eq!(msg.instructed_amount.amount, "0");
        assert_eq!(msg.remittance_information, "");
    }

    #[test]
    fn creation_time_is_rfc3339_on_the_wire() {
        let msg = Iso20022Mapper::new().to_iso20022(&Transaction::default(), now());
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["creation_date_time"], "2024-03-05T07:08:09Z");
    }
}
