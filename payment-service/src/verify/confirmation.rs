//! Client payment confirmation verification.
//!
//! After checkout, Razorpay hands the client a signature over the
//! order/payment pair. The client submits it back to us, and this verifier
//! decides whether that claim can be trusted before the order is completed.

use tracing::{info, warn};

use crate::verify::signature::verify_with_any;
use crate::verify::Rejection;

/// A payment confirmation that passed signature verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedPayment {
    pub payment_id: String,
}

/// Verifies client-submitted payment confirmations.
///
/// Holds the confirmation signing secrets in rotation order, loaded once at
/// startup. This verifier does not record that a payment completed; that is
/// the caller's responsibility after a `ConfirmedPayment` comes back.
#[derive(Debug, Clone)]
pub struct ConfirmationVerifier {
    secrets: Vec<String>,
}

impl ConfirmationVerifier {
    pub fn new(secrets: Vec<String>) -> Self {
        Self { secrets }
    }

    /// Verify a client's claim that Razorpay approved `payment_id` for
    /// `order_id`.
    ///
    /// The canonical message is `order_id + "|" + payment_id` and the
    /// signature is Razorpay's hex HMAC-SHA256 over it. Empty inputs are
    /// rejected before any cryptographic work.
    pub fn verify(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<ConfirmedPayment, Rejection> {
        if order_id.is_empty() || payment_id.is_empty() || signature.is_empty() {
            warn!(
                has_order_id = !order_id.is_empty(),
                has_payment_id = !payment_id.is_empty(),
                has_signature = !signature.is_empty(),
                "confirmation_missing_fields"
            );
            return Err(Rejection::MissingFields);
        }

        let message = format!("{order_id}|{payment_id}");
        if !verify_with_any(&self.secrets, message.as_bytes(), signature) {
            warn!(order_id = %order_id, "confirmation_signature_invalid");
            return Err(Rejection::InvalidSignature);
        }

        info!(
            order_id = %order_id,
            payment_id = %payment_id,
            "confirmation_verified"
        );

        Ok(ConfirmedPayment {
            payment_id: payment_id.to_string(),
        })
    }
}
