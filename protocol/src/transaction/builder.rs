//! Transaction construction via the builder pattern.
//!
//! Records usually arrive as JSON, but tests, benches and the node's demo
//! build them in code. The builder keeps those call sites readable and
//! leaves every unset field absent.

use super::types::Transaction;

/// Fluent builder for [`Transaction`] records.
///
/// # Usage
///
/// ```
/// use energy_protocol::transaction::TransactionBuilder;
///
/// let tx = TransactionBuilder::new()
///     .id("tx_001")
///     .amount(100.0)
///     .sender("wallet_alice")
///     .receiver("wallet_bob")
///     .purpose("payment for services")
///     .build();
///
/// assert_eq!(tx.from, "wallet_alice");
/// assert_eq!(tx.time_priority, None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    tx: Transaction,
}

impl TransactionBuilder {
    /// Creates a builder with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the caller-supplied identifier.
    pub fn id(mut self, id: &str) -> Self {
        self.tx.id = Some(id.to_string());
        self
    }

    /// Sets the amount.
    pub fn amount(mut self, amount: f64) -> Self {
        self.tx.amount = Some(amount);
        self
    }

    /// Sets the `from` identifier.
    pub fn sender(mut self, from: &str) -> Self {
        self.tx.from = from.to_string();
        self
    }

    /// Sets the `to` identifier.
    pub fn receiver(mut self, to: &str) -> Self {
        self.tx.to = to.to_string();
        self
    }

    /// Sets the free-text purpose.
    pub fn purpose(mut self, purpose: &str) -> Self {
        self.tx.purpose = Some(purpose.to_string());
        self
    }

    /// Sets the timestamp string, stored verbatim.
    pub fn timestamp(mut self, timestamp: &str) -> Self {
        self.tx.timestamp = Some(timestamp.to_string());
        self
    }

    /// Sets the time priority.
    pub fn time_priority(mut self, priority: f64) -> Self {
        self.tx.time_priority = Some(priority);
        self
    }

    /// Sets the currency code.
    pub fn currency(mut self, currency: &str) -> Self {
        self.tx.currency = Some(currency.to_string());
        self
    }

    /// Consumes the builder and returns the record.
    pub fn build(self) -> Transaction {
        self.tx
    }
}
