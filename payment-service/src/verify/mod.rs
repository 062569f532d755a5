//! Payment message trust boundary.
//!
//! Two independent verification flows share one HMAC-SHA256 primitive:
//! - [`ConfirmationVerifier`] validates a client's claim that Razorpay
//!   approved a specific order/payment pair.
//! - [`WebhookVerifier`] validates that an inbound callback genuinely
//!   originated from Razorpay.
//!
//! Verification is stateless: each request is independently verifiable from
//! its own inputs and the immutable process-wide secrets.

pub mod confirmation;
pub mod signature;
pub mod webhook;

pub use confirmation::{ConfirmationVerifier, ConfirmedPayment};
pub use signature::{verify_signature, verify_with_any};
pub use webhook::{WebhookEvent, WebhookVerifier};

use thiserror::Error;

/// Reasons a payment-related message is rejected.
///
/// Rejections are ordinary result values, never panics. Neither variant
/// carries the secret, the computed digest, or the presented signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Required identifiers were absent from a confirmation request.
    #[error("missing payment details")]
    MissingFields,

    /// The presented signature does not match the computed digest.
    #[error("invalid signature")]
    InvalidSignature,

    /// The body carried a valid signature but could not be parsed.
    #[error("malformed payload")]
    MalformedPayload,
}
