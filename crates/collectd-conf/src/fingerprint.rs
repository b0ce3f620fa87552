//! Content fingerprinting for change detection

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of `data` as a lowercase hex string.
///
/// The fingerprint is a cheap, stable equality check across reconciliation
/// passes: a stored fingerprint matching a freshly computed one means the
/// rendered configuration has not changed. It is not used for secrecy.
pub fn fingerprint(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digest() {
        assert_eq!(
            fingerprint(b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn empty_input_is_valid() {
        assert_eq!(
            fingerprint(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn identical_input_identical_digest() {
        assert_eq!(
            fingerprint(b"LoadPlugin cpu\n"),
            fingerprint(b"LoadPlugin cpu\n")
        );
    }

    #[test]
    fn distinct_input_distinct_digest() {
        assert_ne!(fingerprint(b"LoadPlugin cpu\n"), fingerprint(b"LoadPlugin mem\n"));
    }
}
