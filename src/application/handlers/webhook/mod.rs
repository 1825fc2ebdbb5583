//! Webhook handlers.
//!
//! ## Commands
//! - Handling an inbound Stripe webhook delivery
//!
//! ## Event handlers
//! - `checkout.session.completed` → order completion

mod checkout_completed;
mod handle_stripe_webhook;

pub use checkout_completed::CheckoutSessionCompletedHandler;
pub use handle_stripe_webhook::{HandleStripeWebhookCommand, HandleStripeWebhookHandler};
