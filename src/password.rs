//! Credential digests for locally stored accounts.
//!
//! SECURITY
//! ========
//! The whole account database lives in the visitor's own browser storage, so
//! no digest here protects anything against the person holding the device.
//! Salted SHA-256 keeps plaintext passwords out of storage dumps and nothing
//! more; it is not an authentication-grade password hash.
//!
//! Records written by older page scripts hold a reversible base64 encoding.
//! Those still verify, and [`needs_upgrade`] tells the login path to rewrite
//! them in the salted form.

#[cfg(test)]
#[path = "password_test.rs"]
mod password_test;

use std::fmt::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};
use uuid::Uuid;

const SCHEME: &str = "sha256";

fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // Writing to a String cannot fail.
        if write!(s, "{b:02x}").is_err() {
            break;
        }
    }
    s
}

fn salted_hex(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

/// Digest `password` with a fresh random salt: `sha256$<salt>$<hex>`.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    format!("{SCHEME}${salt}${}", salted_hex(&salt, password))
}

/// Check `password` against a stored digest of either form.
#[must_use]
pub fn verify_password(password: &str, digest: &str) -> bool {
    match parse_salted(digest) {
        Some((salt, expected)) => salted_hex(salt, password) == expected,
        None => STANDARD.encode(password.as_bytes()) == digest,
    }
}

/// True for digests still in the legacy base64 form.
#[must_use]
pub fn needs_upgrade(digest: &str) -> bool {
    parse_salted(digest).is_none()
}

fn parse_salted(digest: &str) -> Option<(&str, &str)> {
    let rest = digest.strip_prefix(SCHEME)?.strip_prefix('$')?;
    let (salt, hex) = rest.split_once('$')?;
    if salt.is_empty() || hex.len() != 64 {
        return None;
    }
    Some((salt, hex))
}
