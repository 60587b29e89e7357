//! # Cryptographic Primitives
//!
//! Everything security-related in the crate flows through here: the hashes
//! behind key derivation, the HMAC behind signing, and the stable hash
//! behind field coordinates.
//!
//! - **SHA-256 / SHA-512** for per-network key derivation.
//! - **HMAC-SHA512** for transaction tags, checked in constant time.
//! - **BLAKE3** for the versioned coordinate hash.
//!
//! Everything here is a thin wrapper around the RustCrypto and BLAKE3
//! crates. No hand-rolled primitives.

pub mod hash;
pub mod mac;

pub use hash::{coordinate_hash, sha256, sha512};
pub use mac::{hmac_sha512, verify_hmac_sha512};
