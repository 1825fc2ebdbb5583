//! HTTP adapter for order endpoints.
//!
//! - `POST /orders/webhook` - Handle Stripe webhooks
//! - `GET /health` - Liveness check

mod handlers;
mod routes;

pub use handlers::{handle_stripe_webhook, health, OrderAppState, STRIPE_SIGNATURE_HEADER};
pub use routes::{order_router, webhook_routes};
