//! SHA-256 checksum of migration text, recorded in run reports.

use sha2::{Digest, Sha256};

/// Compute the hex-encoded SHA-256 digest of `text`
pub fn compute_checksum(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    format!("{:x}", digest)
}
