//! Webhook dispatch - Routes verified events to their handlers.
//!
//! Handlers are registered against [`StripeEventType`] variants, so the set
//! of routable types is fixed at compile time. Anything else falls through
//! to the default branch and is acknowledged without action.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::{StripeEvent, StripeEventType, WebhookError};

/// Handler for a specific type of Stripe webhook event.
///
/// Implementations should be stateless and focus on a single event type.
#[async_trait]
pub trait WebhookEventHandler: Send + Sync {
    /// Returns the event type(s) this handler processes.
    fn handles(&self) -> Vec<StripeEventType>;

    /// Handles the webhook event.
    async fn handle(&self, event: &StripeEvent) -> Result<(), WebhookError>;
}

/// What the registry did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A registered handler ran to completion.
    Handled(StripeEventType),
    /// No handler is registered for this type tag.
    Unhandled(String),
}

/// Registry mapping event types to handlers.
#[derive(Default)]
pub struct WebhookHandlerRegistry {
    handlers: HashMap<StripeEventType, Arc<dyn WebhookEventHandler>>,
}

impl WebhookHandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for every type it declares.
    ///
    /// A later registration for the same type replaces the earlier one.
    pub fn register(mut self, handler: Arc<dyn WebhookEventHandler>) -> Self {
        for event_type in handler.handles() {
            self.handlers.insert(event_type, handler.clone());
        }
        self
    }

    /// Find a handler for the given event type.
    pub fn get_handler(&self, event_type: &StripeEventType) -> Option<&dyn WebhookEventHandler> {
        self.handlers.get(event_type).map(|h| h.as_ref())
    }

    /// Dispatch an event to its handler.
    ///
    /// Unrecognised or unregistered types are not an error.
    pub async fn dispatch(&self, event: &StripeEvent) -> Result<DispatchOutcome, WebhookError> {
        let handler = event
            .parsed_type()
            .and_then(|event_type| self.get_handler(&event_type).map(|h| (event_type, h)));

        match handler {
            Some((event_type, handler)) => {
                handler.handle(event).await?;
                Ok(DispatchOutcome::Handled(event_type))
            }
            None => {
                tracing::info!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    "Unhandled event type"
                );
                Ok(DispatchOutcome::Unhandled(event.event_type.clone()))
            }
        }
    }
}
