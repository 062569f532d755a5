//! Payment verification service.
//!
//! Decides, for two distinct message sources, whether a payment-related
//! message can be trusted before the system acts on it:
//! - client-submitted payment confirmations after checkout
//! - Razorpay-originated webhook deliveries
//!
//! ## Architecture
//!
//! ```text
//! HTTP request → extract signature + message → signature verification
//!              → (valid)   dispatch / confirmation response
//!              → (invalid) rejection response
//! ```

pub mod config;
pub mod dispatch;
pub mod verify;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use dispatch::{EventDispatcher, LogRecorder, PaymentRecorder};
pub use verify::{
    ConfirmationVerifier, ConfirmedPayment, Rejection, WebhookEvent, WebhookVerifier,
};
pub use web::{router, AppState};
