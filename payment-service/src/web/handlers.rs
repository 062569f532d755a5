//! Payment endpoint handlers.
//!
//! Both endpoints sit on the same trust boundary: an attacker can submit
//! arbitrary requests here and must be cryptographically prevented from
//! forging a "payment succeeded" state. Handlers only extract the claimed
//! signature and message, hand them to the verifiers, and branch on the
//! result; no side effect runs before verification succeeds.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::dispatch::EventDispatcher;
use crate::verify::{ConfirmationVerifier, Rejection, WebhookVerifier};
use crate::Config;

/// Header carrying the hex HMAC-SHA256 digest of the raw webhook body.
pub const SIGNATURE_HEADER: &str = "x-razorpay-signature";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub confirmations: Arc<ConfirmationVerifier>,
    pub webhooks: Arc<WebhookVerifier>,
    pub dispatcher: EventDispatcher,
}

impl AppState {
    pub fn new(config: Config, dispatcher: EventDispatcher) -> Self {
        let confirmations = Arc::new(ConfirmationVerifier::new(
            config.confirmation_secrets.clone(),
        ));
        let webhooks = Arc::new(WebhookVerifier::new(config.webhook_secrets.clone()));
        Self {
            config: Arc::new(config),
            confirmations,
            webhooks,
            dispatcher,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Payment Confirmation
// =============================================================================

/// Client-submitted payment confirmation.
///
/// Fields default to empty so an absent field maps to the `MissingFields`
/// rejection instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct ConfirmationRequest {
    #[serde(default)]
    pub razorpay_order_id: String,
    #[serde(default)]
    pub razorpay_payment_id: String,
    #[serde(default)]
    pub razorpay_signature: String,
}

/// Confirmation endpoint response.
#[derive(Serialize)]
pub struct ConfirmationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl ConfirmationResponse {
    fn verified(payment_id: String) -> Self {
        Self {
            success: true,
            message: Some("Payment verified successfully"),
            payment_id: Some(payment_id),
            error: None,
        }
    }

    fn rejected(error: &'static str) -> Self {
        Self {
            success: false,
            message: None,
            payment_id: None,
            error: Some(error),
        }
    }
}

/// Payment confirmation endpoint.
///
/// Validates the client's claim that Razorpay approved an order/payment
/// pair, using the signature Razorpay returned to the client. The body is
/// read as raw bytes and parsed here so that a malformed body surfaces as
/// the 500 contract with a sanitized message, never the parser's own text.
pub async fn confirm_payment(
    State(state): State<AppState>,
    body: Bytes,
) -> impl IntoResponse {
    if state.config.confirmation_secrets.is_empty() {
        error!("confirmation_secret_unconfigured");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ConfirmationResponse::rejected(
                "Payment verification unavailable",
            )),
        );
    }

    let request: ConfirmationRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            error!(error = %e, "confirmation_body_unparseable");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ConfirmationResponse::rejected("Invalid request body")),
            );
        }
    };

    match state.confirmations.verify(
        &request.razorpay_order_id,
        &request.razorpay_payment_id,
        &request.razorpay_signature,
    ) {
        Ok(confirmed) => (
            StatusCode::OK,
            Json(ConfirmationResponse::verified(confirmed.payment_id)),
        ),
        Err(Rejection::MissingFields) => (
            StatusCode::BAD_REQUEST,
            Json(ConfirmationResponse::rejected("Missing payment details")),
        ),
        Err(Rejection::InvalidSignature) => (
            StatusCode::BAD_REQUEST,
            Json(ConfirmationResponse::rejected("Invalid signature")),
        ),
        Err(Rejection::MalformedPayload) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ConfirmationResponse::rejected("Invalid request body")),
        ),
    }
}

// =============================================================================
// Razorpay Webhook
// =============================================================================

/// Webhook endpoint response.
#[derive(Serialize)]
pub struct WebhookResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl WebhookResponse {
    fn ok() -> Self {
        Self {
            status: Some("ok"),
            error: None,
        }
    }

    fn rejected(error: &'static str) -> Self {
        Self {
            status: None,
            error: Some(error),
        }
    }
}

/// Razorpay webhook endpoint.
///
/// The signature is read from the transport header and checked against the
/// raw body bytes exactly as received; the body is only parsed after the
/// signature matches. A verified event is dispatched fire-and-forget, so
/// the acknowledgement never depends on the side effect succeeding.
pub async fn razorpay_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    if state.config.webhook_secrets.is_empty() {
        error!("webhook_secret_unconfigured");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(WebhookResponse::rejected("Webhook verification unavailable")),
        );
    }

    let presented = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if presented.is_empty() {
        warn!("webhook_signature_header_missing");
    }

    match state.webhooks.verify(&body, presented) {
        Ok(event) => {
            state.dispatcher.dispatch(&event);
            info!(body_length = body.len(), "webhook_acknowledged");
            (StatusCode::OK, Json(WebhookResponse::ok()))
        }
        Err(Rejection::InvalidSignature | Rejection::MissingFields) => (
            StatusCode::BAD_REQUEST,
            Json(WebhookResponse::rejected("Invalid signature")),
        ),
        Err(Rejection::MalformedPayload) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(WebhookResponse::rejected("Invalid webhook payload")),
        ),
    }
}
