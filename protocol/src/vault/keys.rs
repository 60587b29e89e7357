//! Seed generation and per-network key derivation.
//!
//! ```text
//! seed = hex(HMAC-SHA512(key = "quantum-seed", msg = 256 bytes of OsRng))
//!
//! key(XRP)  = SHA-256(seed_utf8 || "XRP")     32 bytes
//! key(XLM)  = SHA-256(seed_utf8 || "XLM")     32 bytes
//! key(XDC)  = SHA-512(seed_utf8 || "XDC")     64 bytes
//! key(HBAR) = SHA-512(seed_utf8 || "HBAR")    64 bytes
//! ```
//!
//! The hash width differs per network and is part of the key format: a key
//! derived with the other width would produce different signatures.

use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::{SEED_DOMAIN_TAG, SEED_ENTROPY_BYTES};
use crate::crypto::hash::{sha256_multi, sha512_multi};
use crate::crypto::hmac_sha512;
use crate::network::Network;

use super::VaultError;

/// Generate a fresh vault seed from the OS CSPRNG.
///
/// Returns 128 lowercase hex characters.
///
/// # Errors
///
/// [`VaultError::EntropySourceFailure`] if the OS cannot supply randomness.
/// There is no fallback to a weaker generator.
/// [`VaultError::InvalidKeyLength`] if the MAC rejects the domain tag.
pub fn generate_seed() -> Result<String, VaultError> {
    let mut entropy = vec![0u8; SEED_ENTROPY_BYTES];
    OsRng
        .try_fill_bytes(&mut entropy)
        .map_err(|e| VaultError::EntropySourceFailure(e.to_string()))?;
    let tag = hmac_sha512(SEED_DOMAIN_TAG, &entropy);
    entropy.fill(0);
    Ok(hex::encode(tag.map_err(|_| VaultError::InvalidKeyLength)?))
}

// ---------------------------------------------------------------------------
// NetworkKey
// ---------------------------------------------------------------------------

/// A per-network MAC key.
///
/// This is a symmetric secret. The signed-record field that carries it is
/// called `public_key`, but whoever reads it can sign.
#[derive(Clone, PartialEq, Eq)]
pub struct NetworkKey {
    bytes: Vec<u8>,
}

impl NetworkKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lowercase hex, as written into `public_key`.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for NetworkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NetworkKey(<{} bytes redacted>)", self.bytes.len())
    }
}

/// Derive one key for `network` from `seed`.
pub fn derive_key(seed: &str, network: Network) -> NetworkKey {
    let parts: [&[u8]; 2] = [seed.as_bytes(), network.as_str().as_bytes()];
    let bytes = match network {
        Network::Xrp | Network::Xlm => sha256_multi(&parts).to_vec(),
        Network::Xdc | Network::Hbar => sha512_multi(&parts),
    };
    NetworkKey { bytes }
}

/// Derive the full key set for every supported network.
pub fn derive_keys(seed: &str) -> BTreeMap<Network, NetworkKey> {
    Network::ALL
        .into_iter()
        .map(|network| (network, derive_key(seed, network)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{sha256, sha512};

    #[test]
    fn generated_seed_is_128_hex_chars() {
        let seed = generate_seed().unwrap();
        assert_eq!(seed.len(), 128);
        assert!(seed.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn generated_seeds_differ() {
        assert_ne!(generate_seed().unwrap(), generate_seed().unwrap());
    }

    #[test]
    fn key_widths_follow_network() {
        let keys = derive_keys("seed");
        assert_eq!(keys[&Network::Xrp].len(), 32);
        assert_eq!(keys[&Network::Xlm].len(), 32);
        assert_eq!(keys[&Network::Xdc].len(), 64);
        assert_eq!(keys[&Network::Hbar].len(), 64);
    }

    #[test]
    fn key_is_hash_of_seed_and_ticker() {
        let key = derive_key("abc", Network::Xrp);
        assert_eq!(key.as_bytes(), sha256(b"abcXRP"));
        let key = derive_key("abc", Network::Hbar);
        assert_eq!(key.as_bytes(), sha512(b"abcHBAR").as_slice());
    }

    #[test]
    fn derivation_is_deterministic() {
        assert_eq!(derive_keys("same seed"), derive_keys("same seed"));
    }

    #[test]
    fn different_seeds_give_different_keys() {
        let a = derive_keys("seed-a");
        let b = derive_keys("seed-b");
        for network in Network::ALL {
            assert_ne!(a[&network], b[&network]);
        }
    }

    #[test]
    fn networks_get_distinct_keys() {
        let keys = derive_keys("seed");
        assert_ne!(keys[&Network::Xrp], keys[&Network::Xlm]);
        assert_ne!(keys[&Network::Xdc], keys[&Network::Hbar]);
    }

    #[test]
    fn debug_does_not_leak_key_bytes() {
        let key = derive_key("secret", Network::Xrp);
        let rendered = format!("{key:?}");
        assert_eq!(rendered, "NetworkKey(<32 bytes redacted>)");
        assert!(!rendered.contains(&key.to_hex()[..8]));
    }
}
