//! Credential helpers: password hashing and opaque bearer tokens.
//!
//! Passwords are stored as `salt$hexdigest` where the digest is SHA-256 over
//! `salt$password`. Tokens are random and only their SHA-256 fingerprint is
//! persisted. All comparisons against stored digests are constant time.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use uuid::Uuid;

const TOKEN_PREFIX: &str = "tok";

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    let digest = salted_digest(&salt, password);
    format!("{salt}${digest}")
}

/// Verify a password against a stored `salt$hexdigest` value.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt, digest)) = stored.split_once('$') else {
        return false;
    };
    let computed = salted_digest(salt, password);
    bool::from(computed.as_bytes().ct_eq(digest.as_bytes()))
}

/// Generate a fresh opaque bearer token.
pub fn generate_token() -> String {
    format!(
        "{TOKEN_PREFIX}_{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}

/// SHA-256 fingerprint of a token, hex encoded. The only form stored at rest.
pub fn token_fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn salted_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b"$");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
