//! Content fingerprinting
//!
//! A document's fingerprint is the lowercase hex SHA-256 digest of its raw
//! bytes. The fingerprint is what the per-tenant uniqueness constraint is
//! built on, so it must depend on content only - never on filename, content
//! type, or upload order.

use sha2::{Digest, Sha256};

/// Compute the content fingerprint for a byte sequence.
///
/// Pure function: identical bytes always produce the identical fingerprint.
/// Callers are expected to reject empty input before hashing; hashing an
/// empty slice still returns a valid digest, it just never reaches the
/// duplicate index.
pub fn content_fingerprint(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_bytes_produce_identical_fingerprints() {
        let a = content_fingerprint(b"Hello inDoc duplicate test");
        let b = content_fingerprint(b"Hello inDoc duplicate test");
        assert_eq!(a, b);
    }

    #[test]
    fn different_bytes_produce_different_fingerprints() {
        let a = content_fingerprint(b"document one");
        let b = content_fingerprint(b"document two");
        assert_ne!(a, b);
    }

    #[test]
    fn fingerprint_is_lowercase_hex_sha256() {
        let fp = content_fingerprint(b"abc");
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        // Known SHA-256 test vector
        assert_eq!(
            fp,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn single_bit_flip_changes_fingerprint() {
        let mut data = vec![0u8; 1024];
        let a = content_fingerprint(&data);
        data[512] ^= 1;
        let b = content_fingerprint(&data);
        assert_ne!(a, b);
    }
}
