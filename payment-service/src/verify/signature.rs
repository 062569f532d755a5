//! Razorpay signature verification primitive.
//!
//! Razorpay signs both client payment confirmations and webhook deliveries
//! with HMAC-SHA256 over a canonical message, hex-encoded.
//! Reference: https://razorpay.com/docs/webhooks/validate-test/

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verify a presented signature against `HMAC-SHA256(secret, message)`.
///
/// `presented` is the hex digest taken from client-submitted JSON or a
/// transport header and is never trusted until it matches. The comparison
/// is constant-time (via `subtle`) so that a mismatch reveals nothing about
/// how many leading digest characters were correct.
///
/// An empty secret or empty presented signature is an explicit `false`,
/// never a skip: a deployment with no secret must reject everything.
/// Mismatch is a normal `false` result, not an error.
pub fn verify_signature(secret: &[u8], message: &[u8], presented: &str) -> bool {
    if secret.is_empty() || presented.is_empty() {
        return false;
    }

    let presented_bytes = match hex::decode(presented) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let mut mac = match HmacSha256::new_from_slice(secret) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(message);
    let expected = mac.finalize().into_bytes();

    // subtle's slice ct_eq rejects length mismatches up front; the byte
    // comparison itself runs in constant time.
    expected.as_slice().ct_eq(presented_bytes.as_slice()).into()
}

/// Verify against an ordered list of secrets, accepting the first match.
///
/// Supports secret rotation: during a rollover both the old and new secret
/// are configured and messages signed under either are accepted. An empty
/// list rejects everything.
pub fn verify_with_any(secrets: &[String], message: &[u8], presented: &str) -> bool {
    secrets
        .iter()
        .any(|secret| verify_signature(secret.as_bytes(), message, presented))
}
