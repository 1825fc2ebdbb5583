//! HandleStripeWebhookHandler - Entry point for inbound Stripe deliveries.

use crate::domain::webhook::{
    DispatchOutcome, StripeWebhookVerifier, WebhookError, WebhookHandlerRegistry, WebhookOutcome,
};

/// Command to handle a Stripe webhook.
#[derive(Debug, Clone)]
pub struct HandleStripeWebhookCommand {
    /// Raw webhook payload, exactly as received.
    pub payload: Vec<u8>,
    /// `Stripe-Signature` header value.
    pub signature: String,
}

/// Verifies, decodes and dispatches webhook deliveries.
///
/// Never fails: every delivery maps to one of the three [`WebhookOutcome`]
/// values, and the transport decides how to answer. Deliveries are not
/// deduplicated here.
pub struct HandleStripeWebhookHandler {
    verifier: StripeWebhookVerifier,
    registry: WebhookHandlerRegistry,
}

impl HandleStripeWebhookHandler {
    pub fn new(verifier: StripeWebhookVerifier, registry: WebhookHandlerRegistry) -> Self {
        Self { verifier, registry }
    }

    pub async fn handle(&self, cmd: HandleStripeWebhookCommand) -> WebhookOutcome {
        match self.process(&cmd).await {
            Ok(DispatchOutcome::Handled(event_type)) => {
                tracing::debug!(event_type = %event_type, "Webhook handled");
                WebhookOutcome::Success
            }
            Ok(DispatchOutcome::Unhandled(_)) => WebhookOutcome::Success,
            Err(e) if e.is_verification_failure() => {
                tracing::warn!(error = %e, "Webhook error while validating signature");
                WebhookOutcome::from(&e)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error handling webhook");
                WebhookOutcome::from(&e)
            }
        }
    }

    async fn process(
        &self,
        cmd: &HandleStripeWebhookCommand,
    ) -> Result<DispatchOutcome, WebhookError> {
        // 1. Verify signature and decode the envelope
        let event = self.verifier.verify_and_parse(&cmd.payload, &cmd.signature)?;

        // 2. Route by type
        self.registry.dispatch(&event).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::webhook::{sign_payload, StripeEvent, StripeEventType, WebhookEventHandler};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    const SECRET: &str = "whsec_handler_test";

    struct CountingHandler {
        calls: AtomicU32,
        result: fn() -> Result<(), WebhookError>,
    }

    impl CountingHandler {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
                result: || Ok(()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
                result: || Err(WebhookError::HandlerFailed("boom".to_string())),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WebhookEventHandler for CountingHandler {
        fn handles(&self) -> Vec<StripeEventType> {
            vec![StripeEventType::CheckoutSessionCompleted]
        }

        async fn handle(&self, _event: &StripeEvent) -> Result<(), WebhookError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    fn handler_with(events: Arc<CountingHandler>) -> HandleStripeWebhookHandler {
        HandleStripeWebhookHandler::new(
            StripeWebhookVerifier::new(SECRET),
            WebhookHandlerRegistry::new().register(events),
        )
    }

    fn signed(payload: &str) -> HandleStripeWebhookCommand {
        HandleStripeWebhookCommand {
            payload: payload.as_bytes().to_vec(),
            signature: sign_payload(SECRET, chrono::Utc::now().timestamp(), payload.as_bytes()),
        }
    }

    const CHECKOUT: &str = r#"{"type":"checkout.session.completed","data":{"object":{"id":"sess_1"}}}"#;

    #[tokio::test]
    async fn valid_delivery_returns_success() {
        let events = CountingHandler::ok();
        let handler = handler_with(events.clone());

        let outcome = handler.handle(signed(CHECKOUT)).await;

        assert_eq!(outcome, WebhookOutcome::Success);
        assert_eq!(events.calls(), 1);
    }

    #[tokio::test]
    async fn bad_signature_returns_invalid_signature_without_dispatch() {
        let events = CountingHandler::ok();
        let handler = handler_with(events.clone());
        let mut cmd = signed(CHECKOUT);
        cmd.signature = format!("t={},v1={}", chrono::Utc::now().timestamp(), "0".repeat(64));

        let outcome = handler.handle(cmd).await;

        assert_eq!(outcome, WebhookOutcome::InvalidSignature);
        assert_eq!(events.calls(), 0);
    }

    #[tokio::test]
    async fn empty_signature_header_returns_invalid_signature() {
        let events = CountingHandler::ok();
        let handler = handler_with(events.clone());
        let mut cmd = signed(CHECKOUT);
        cmd.signature = String::new();

        let outcome = handler.handle(cmd).await;

        assert_eq!(outcome, WebhookOutcome::InvalidSignature);
        assert_eq!(events.calls(), 0);
    }

    #[tokio::test]
    async fn stale_delivery_returns_invalid_signature() {
        let events = CountingHandler::ok();
        let handler = handler_with(events.clone());
        let stale = chrono::Utc::now().timestamp() - 3600;
        let cmd = HandleStripeWebhookCommand {
            payload: CHECKOUT.as_bytes().to_vec(),
            signature: sign_payload(SECRET, stale, CHECKOUT.as_bytes()),
        };

        let outcome = handler.handle(cmd).await;

        assert_eq!(outcome, WebhookOutcome::InvalidSignature);
        assert_eq!(events.calls(), 0);
    }

    #[tokio::test]
    async fn unparseable_payload_returns_error() {
        let events = CountingHandler::ok();
        let handler = handler_with(events.clone());

        let outcome = handler.handle(signed("{not json")).await;

        assert_eq!(outcome, WebhookOutcome::Error);
        assert_eq!(events.calls(), 0);
    }

    #[tokio::test]
    async fn handler_failure_returns_error() {
        let events = CountingHandler::failing();
        let handler = handler_with(events.clone());

        let outcome = handler.handle(signed(CHECKOUT)).await;

        assert_eq!(outcome, WebhookOutcome::Error);
        assert_eq!(events.calls(), 1);
    }

    #[tokio::test]
    async fn unhandled_type_returns_success_without_dispatch() {
        let events = CountingHandler::ok();
        let handler = handler_with(events.clone());

        let outcome = handler
            .handle(signed(r#"{"type":"invoice.paid","data":{"object":{"id":"in_1"}}}"#))
            .await;

        assert_eq!(outcome, WebhookOutcome::Success);
        assert_eq!(events.calls(), 0);
    }

    #[tokio::test]
    async fn redelivery_is_dispatched_again() {
        let events = CountingHandler::ok();
        let handler = handler_with(events.clone());

        handler.handle(signed(CHECKOUT)).await;
        handler.handle(signed(CHECKOUT)).await;

        assert_eq!(events.calls(), 2);
    }
}
