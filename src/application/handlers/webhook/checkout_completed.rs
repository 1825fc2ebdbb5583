//! CheckoutSessionCompletedHandler - Hands completed checkouts to order completion.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::order::CheckoutSessionCompleted;
use crate::domain::webhook::{StripeEvent, StripeEventType, WebhookError, WebhookEventHandler};
use crate::ports::OrderCompletion;

/// Handles `checkout.session.completed`.
///
/// Decodes the event's data object into a [`CheckoutSessionCompleted`] and
/// passes it to [`OrderCompletion`]. An event without an object is a no-op.
pub struct CheckoutSessionCompletedHandler {
    orders: Arc<dyn OrderCompletion>,
}

impl CheckoutSessionCompletedHandler {
    pub fn new(orders: Arc<dyn OrderCompletion>) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl WebhookEventHandler for CheckoutSessionCompletedHandler {
    fn handles(&self) -> Vec<StripeEventType> {
        vec![StripeEventType::CheckoutSessionCompleted]
    }

    async fn handle(&self, event: &StripeEvent) -> Result<(), WebhookError> {
        let session: Option<CheckoutSessionCompleted> = event
            .deserialize_object()
            .map_err(|e| WebhookError::ParseError(format!("checkout session: {}", e)))?;

        let Some(session) = session else {
            tracing::debug!(event_id = %event.id, "Checkout event without session object");
            return Ok(());
        };

        tracing::info!(
            event_id = %event.id,
            session_id = %session.id,
            user = session.user_reference().unwrap_or("unknown"),
            "Checkout session completed"
        );

        self.orders
            .complete_checkout(session)
            .await
            .map_err(|e| WebhookError::HandlerFailed(e.to_string()))
    }
}
