//! Visitor identity hashing.
//!
//! Repeat visits by the same person are matched via a SHA-256 digest over
//! normalized identity fields, so the validity evaluator can find prior
//! completions without storing a separate person table.

use sha2::{Digest, Sha256};

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Derive the stable identity key of a visitor.
///
/// Fields are trimmed and lowercased before hashing so that casing and
/// stray whitespace do not split one person into several identities.
/// Returns `None` when every field is blank -- an anonymous visitor has no
/// usable identity and never matches a prior completion.
pub fn identity_key(
    first_name: &str,
    last_name: &str,
    email: Option<&str>,
) -> Option<String> {
    let first = first_name.trim().to_lowercase();
    let last = last_name.trim().to_lowercase();
    let email = email.unwrap_or_default().trim().to_lowercase();

    if first.is_empty() && last.is_empty() && email.is_empty() {
        return None;
    }

    let material = format!("{first}\n{last}\n{email}");
    Some(sha256_hex(material.as_bytes()))
}
