//! Checksum validation for migrations
//!
//! SHA256 of the migration SQL, recorded on apply and compared on every
//! later startup so an edited migration is caught instead of silently skipped.

use sha2::{Digest, Sha256};

/// Compute SHA256 checksum of a string
pub fn compute_checksum(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
