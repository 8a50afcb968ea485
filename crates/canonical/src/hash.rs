//! Digests of canonical text.
//!
//! ```text
//! SHA-256(version.to_be_bytes() || 0x00 || canonical_text_bytes)
//! ```
//!
//! The configuration version is part of the digest, so the same visible
//! text canonicalized under two different configuration versions never
//! produces the same digest.

use sha2::{Digest, Sha256};

/// Compute the version-aware digest of canonical text.
///
/// ```rust
/// use canonical::hash_canonical_bytes;
///
/// let v1 = hash_canonical_bytes(1, b"Hello World");
/// let v2 = hash_canonical_bytes(2, b"Hello World");
/// assert_ne!(v1, v2);
/// assert_eq!(v1, hash_canonical_bytes(1, b"Hello World"));
/// ```
pub fn hash_canonical_bytes(canonical_version: u32, canonical_bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_version.to_be_bytes());
    hasher.update([0]);
    hasher.update(canonical_bytes);
    hex::encode(hasher.finalize())
}
