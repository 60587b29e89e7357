//! # Vault Module
//!
//! Holds a master seed and the per-network keys derived from it, and signs
//! transactions with HMAC-SHA512 under those keys.
//!
//! ```text
//! keys.rs    — seed generation and per-network key derivation
//! signing.rs — canonical message, signed records, verification
//! ```
//!
//! Keys are derived once at construction and never change, so a `Vault`
//! can be shared across threads by reference or `Arc` without locking.
//!
//! Neither the seed nor any key is ever logged or persisted here.
//! Persisting the seed is the caller's job.

pub mod keys;
pub mod signing;

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;
use tracing::info;

use crate::crypto::hmac_sha512;
use crate::network::{Network, NetworkError};
use crate::transaction::Transaction;

pub use keys::{derive_key, derive_keys, generate_seed, NetworkKey};
pub use signing::{
    check_transaction, serialize_transaction, verify_transaction, SignedTransaction,
    VerificationFailure,
};

/// Errors raised by vault construction and signing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VaultError {
    /// The OS random source could not supply entropy for a seed.
    #[error("secure entropy source unavailable: {0}")]
    EntropySourceFailure(String),

    /// The MAC backend rejected a key.
    #[error("MAC key rejected")]
    InvalidKeyLength,

    /// Signing was requested for a network outside the resonance table.
    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// A seed and its derived per-network keys.
pub struct Vault {
    seed: String,
    keys: BTreeMap<Network, NetworkKey>,
}

impl fmt::Debug for Vault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vault")
            .field("seed", &"<redacted>")
            .field("networks", &self.keys.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Vault {
    /// Create a vault with a freshly generated seed.
    ///
    /// # Errors
    ///
    /// [`VaultError::EntropySourceFailure`] if the OS RNG is unavailable.
    pub fn generate() -> Result<Self, VaultError> {
        let seed = generate_seed()?;
        info!("generated new vault seed");
        Ok(Self::from_seed(seed))
    }

    /// Create a vault from an existing seed. Any string is accepted.
    pub fn from_seed(seed: impl Into<String>) -> Self {
        let seed = seed.into();
        let keys = derive_keys(&seed);
        info!(networks = keys.len(), "vault keys derived");
        Self { seed, keys }
    }

    /// The master seed. Handle with care.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// The key for `network`.
    pub fn key(&self, network: Network) -> Option<&NetworkKey> {
        self.keys.get(&network)
    }

    /// Hex of the key for a network identifier, as it would appear in a
    /// signed record's `public_key`.
    ///
    /// # Errors
    ///
    /// [`VaultError::Network`] for an unsupported identifier.
    pub fn public_key(&self, network: &str) -> Result<String, VaultError> {
        let network = Network::lookup(network)?;
        Ok(self.key_for(network)?.to_hex())
    }

    /// Sign `tx` under the key for `network`.
    ///
    /// Returns a new record; `tx` is not modified.
    ///
    /// # Errors
    ///
    /// [`VaultError::Network`] for an unsupported identifier, or
    /// [`VaultError::InvalidKeyLength`] if the MAC rejects the derived key.
    pub fn sign(&self, tx: &Transaction, network: &str) -> Result<SignedTransaction, VaultError> {
        let network = Network::lookup(network)?;
        let key = self.key_for(network)?;

        let message = serialize_transaction(tx);
        let tag =
            hmac_sha512(key.as_bytes(), &message).map_err(|_| VaultError::InvalidKeyLength)?;

        Ok(SignedTransaction {
            transaction: tx.clone(),
            signature: Some(hex::encode(tag)),
            public_key: Some(key.to_hex()),
            network: Some(network.as_str().to_string()),
        })
    }

    /// Verify a signed record. Uses only the record, never this vault's keys.
    pub fn verify(&self, signed: &SignedTransaction) -> bool {
        verify_transaction(signed)
    }

    fn key_for(&self, network: Network) -> Result<&NetworkKey, VaultError> {
        self.keys.get(&network).ok_or_else(|| {
            VaultError::Network(NetworkError::UnsupportedNetwork {
                network: network.as_str().to_string(),
            })
        })
    }
}
