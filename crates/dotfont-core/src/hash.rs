//! Artifact hashing.
//!
//! Every conversion is deterministic, so the BLAKE3 digest of an emitted
//! artifact doubles as a regression check: the same input under the same
//! options always produces the same hash.

/// Computes the BLAKE3 hash of an emitted artifact.
///
/// # Returns
/// A 64-character lowercase hexadecimal string.
pub fn artifact_hash(content: &str) -> String {
    blake3::hash(content.as_bytes()).to_hex().to_string()
}
