//! Keyed-hash message authentication (HMAC-SHA512).
//!
//! The vault's "signatures" are HMAC tags, not public-key signatures. The
//! same symmetric key produces and checks a tag, so anyone able to verify
//! is also able to sign. Treat the key as a shared secret.
//!
//! Tag comparison goes through `Mac::verify_slice`, which compares in
//! constant time. Never compare tags with `==`.

use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Compute `HMAC-SHA512(key, message)`.
///
/// # Errors
///
/// [`InvalidLength`] if the key is rejected. HMAC pre-hashes long keys and
/// pads short ones, so the current backend accepts every length.
pub fn hmac_sha512(key: &[u8], message: &[u8]) -> Result<[u8; 64], InvalidLength> {
    let mut mac = HmacSha512::new_from_slice(key)?;
    mac.update(message);
    let mut tag = [0u8; 64];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    Ok(tag)
}

/// Check `tag` against `HMAC-SHA512(key, message)` in constant time.
///
/// Returns `false` for a wrong tag or a tag of the wrong length.
pub fn verify_hmac_sha512(key: &[u8], message: &[u8], tag: &[u8]) -> bool {
    match HmacSha512::new_from_slice(key) {
        Ok(mut mac) => {
            mac.update(message);
            mac.verify_slice(tag).is_ok()
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc4231_test_case_2() {
        // RFC 4231, test case 2: key = "Jefe".
        let tag = hmac_sha512(b"Jefe", b"what do ya want for nothing?").unwrap();
        let expected = hex::decode(
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554\
             9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737",
        )
        .unwrap();
        assert_eq!(tag.as_slice(), expected.as_slice());
    }

    #[test]
    fn verify_accepts_matching_tag() {
        let tag = hmac_sha512(b"key", b"message").unwrap();
        assert!(verify_hmac_sha512(b"key", b"message", &tag));
    }

    #[test]
    fn verify_rejects_wrong_key_or_message() {
        let tag = hmac_sha512(b"key", b"message").unwrap();
        assert!(!verify_hmac_sha512(b"other", b"message", &tag));
        assert!(!verify_hmac_sha512(b"key", b"massage", &tag));
    }

    #[test]
    fn verify_rejects_truncated_tag() {
        let tag = hmac_sha512(b"key", b"message").unwrap();
        assert!(!verify_hmac_sha512(b"key", b"message", &tag[..32]));
        assert!(!verify_hmac_sha512(b"key", b"message", &[]));
    }

    #[test]
    fn oversized_key_is_accepted() {
        let key = [0xaa_u8; 200];
        let tag = hmac_sha512(&key, b"message").unwrap();
        assert!(verify_hmac_sha512(&key, b"message", &tag));
    }

    #[test]
    fn empty_key_is_accepted() {
        let tag = hmac_sha512(b"", b"message").unwrap();
        assert!(verify_hmac_sha512(b"", b"message", &tag));
    }
}
