//! # Hashing Utilities
//!
//! Hash functions used by the vault and the energy field. Two families,
//! each with one job:
//!
//! - **SHA-256 / SHA-512** — per-network key derivation. The vault derives
//!   two 32-byte keys and two 64-byte keys, and the split is part of the
//!   key format, so both widths stay.
//!
//! - **BLAKE3 (derive-key mode)** — the stable coordinate hash that places a
//!   transaction on the y axis of the energy field. It must give the same
//!   answer in every process, on every platform, forever (or at least until
//!   [`COORDINATE_HASH_VERSION`] is bumped).
//!
//! ## Why not `std::hash`?
//!
//! `DefaultHasher` is randomly keyed per process. Coordinates computed with
//! it would differ between two runs over the same input, which makes field
//! snapshots irreproducible.

use sha2::{Digest, Sha256, Sha512};

use crate::config::COORDINATE_HASH_VERSION;

/// BLAKE3 derive-key context for field coordinates. Tied to
/// [`COORDINATE_HASH_VERSION`]; the test below keeps the two in sync.
const COORDINATE_CONTEXT: &str = "energy-protocol 2026-01 field coordinate v1";

/// Compute the SHA-256 hash of the input and return a fixed-size array.
///
/// # Example
///
/// ```
/// use energy_protocol::crypto::sha256;
///
/// let hash = sha256(b"energy");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute the SHA-512 hash of the input.
///
/// Returned as a `Vec<u8>` because every caller stores it next to SHA-256
/// output in a variable-width key.
pub fn sha512(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha512::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// Hash multiple byte slices together without concatenation overhead.
///
/// `sha256_multi(&[a, b]) == sha256(a || b)`.
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut output = [0u8; 32];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// SHA-512 over several slices, fed sequentially.
pub fn sha512_multi(parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().to_vec()
}

/// Compute a domain-separated BLAKE3 hash with a context string.
///
/// Uses BLAKE3's `derive_key` mode, so two contexts can never collide even
/// on identical data.
pub fn domain_separated_hash(context: &str, data: &[u8]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new_derive_key(context);
    hasher.update(data);
    *hasher.finalize().as_bytes()
}

/// Deterministic, process-independent 64-bit hash used for field coordinates.
///
/// The first eight bytes of a domain-separated BLAKE3 digest, read
/// little-endian. Reproducible across processes, platforms and language
/// ports that implement the same construction.
///
/// # Example
///
/// ```
/// use energy_protocol::crypto::coordinate_hash;
///
/// assert_eq!(coordinate_hash(b"tx_001"), coordinate_hash(b"tx_001"));
/// ```
pub fn coordinate_hash(data: &[u8]) -> u64 {
    let digest = domain_separated_hash(COORDINATE_CONTEXT, data);
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(head)
}
