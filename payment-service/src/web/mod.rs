//! Web server module for the payment trust boundary.
//!
//! Exposes the two verification endpoints plus a health check:
//! - `POST /payments/confirm`: client-submitted payment confirmations
//! - `POST /webhooks/razorpay`: Razorpay webhook deliveries
//! - `GET /health`

pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};

pub use handlers::{
    confirm_payment, health, razorpay_webhook, AppState, ConfirmationRequest,
    ConfirmationResponse, HealthResponse, WebhookResponse, SIGNATURE_HEADER,
};

/// Build the service router over shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/payments/confirm", post(confirm_payment))
        .route("/webhooks/razorpay", post(razorpay_webhook))
        .with_state(state)
}
