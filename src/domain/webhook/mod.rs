//! Stripe webhook verification and dispatch.
//!
//! An inbound request is verified against the shared signing secret, decoded
//! into a [`StripeEvent`] and routed by [`StripeEventType`] to a registered
//! handler. Only verified payloads ever reach a handler.

mod dispatcher;
mod outcome;
mod stripe_event;
mod webhook_errors;
mod webhook_verifier;

pub use dispatcher::{DispatchOutcome, WebhookEventHandler, WebhookHandlerRegistry};
pub use outcome::WebhookOutcome;
pub use stripe_event::{StripeEvent, StripeEventData, StripeEventType};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{
    sign_payload, SignatureHeader, StripeWebhookVerifier, DEFAULT_CLOCK_SKEW_SECS,
    DEFAULT_TOLERANCE_SECS,
};

#[cfg(test)]
pub use stripe_event::StripeEventBuilder;
