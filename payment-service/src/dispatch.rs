//! Verified webhook event dispatch.
//!
//! Events reach the dispatcher only after their signature has been
//! verified. Dispatch is a fire-and-forget observability step: a failed
//! side effect is logged and swallowed, because the verification outcome is
//! already committed and a non-2xx acknowledgement would only trigger a
//! redundant re-delivery from Razorpay.

use std::sync::Arc;

use tracing::{error, info};

use crate::verify::WebhookEvent;

/// Order-management collaborator that records captured payments.
///
/// The service itself does not persist anything; whatever system owns
/// orders implements this trait and is handed each captured payment id.
pub trait PaymentRecorder: Send + Sync {
    fn record_captured_payment(&self, payment_id: &str) -> anyhow::Result<()>;
}

/// Recorder that writes captured payment ids to the audit log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRecorder;

impl PaymentRecorder for LogRecorder {
    fn record_captured_payment(&self, payment_id: &str) -> anyhow::Result<()> {
        info!(payment_id = %payment_id, "payment_captured_recorded");
        Ok(())
    }
}

/// Routes verified events to their side effects.
#[derive(Clone)]
pub struct EventDispatcher {
    recorder: Arc<dyn PaymentRecorder>,
}

impl EventDispatcher {
    pub fn new(recorder: Arc<dyn PaymentRecorder>) -> Self {
        Self { recorder }
    }

    /// Perform the side effect for a verified event.
    ///
    /// The match is exhaustive over event variants, so an unhandled type is
    /// a visible `Unknown` arm rather than a silent runtime fallthrough.
    pub fn dispatch(&self, event: &WebhookEvent) {
        match event {
            WebhookEvent::PaymentCaptured { payment_id } => {
                if let Err(e) = self.recorder.record_captured_payment(payment_id) {
                    error!(error = %e, "payment_capture_record_failed");
                }
            }
            WebhookEvent::Unknown { event } => {
                info!(event = %event, "webhook_event_ignored");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRecorder {
        captured: Mutex<Vec<String>>,
    }

    impl PaymentRecorder for RecordingRecorder {
        fn record_captured_payment(&self, payment_id: &str) -> anyhow::Result<()> {
            self.captured.lock().unwrap().push(payment_id.to_string());
            Ok(())
        }
    }

    struct FailingRecorder;

    impl PaymentRecorder for FailingRecorder {
        fn record_captured_payment(&self, _payment_id: &str) -> anyhow::Result<()> {
            anyhow::bail!("order service unavailable")
        }
    }

    #[test]
    fn test_captured_payment_reaches_recorder() {
        let recorder = Arc::new(RecordingRecorder::default());
        let dispatcher = EventDispatcher::new(recorder.clone());

        dispatcher.dispatch(&WebhookEvent::PaymentCaptured {
            payment_id: "pay_1".to_string(),
        });

        assert_eq!(*recorder.captured.lock().unwrap(), vec!["pay_1"]);
    }

    #[test]
    fn test_unknown_event_has_no_side_effect() {
        let recorder = Arc::new(RecordingRecorder::default());
        let dispatcher = EventDispatcher::new(recorder.clone());

        dispatcher.dispatch(&WebhookEvent::Unknown {
            event: "order.paid".to_string(),
        });

        assert!(recorder.captured.lock().unwrap().is_empty());
    }

    #[test]
    fn test_recorder_failure_is_swallowed() {
        let dispatcher = EventDispatcher::new(Arc::new(FailingRecorder));

        // Must not panic or propagate; the acknowledgement has already been
        // decided by verification.
        dispatcher.dispatch(&WebhookEvent::PaymentCaptured {
            payment_id: "pay_1".to_string(),
        });
    }
}
