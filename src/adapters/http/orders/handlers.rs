//! HTTP handlers for order endpoints.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::application::{HandleStripeWebhookCommand, HandleStripeWebhookHandler};

/// Header carrying the Stripe signature.
pub const STRIPE_SIGNATURE_HEADER: &str = "Stripe-Signature";

/// Shared application state for order endpoints.
#[derive(Clone)]
pub struct OrderAppState {
    pub webhook_handler: Arc<HandleStripeWebhookHandler>,
}

impl OrderAppState {
    pub fn new(webhook_handler: Arc<HandleStripeWebhookHandler>) -> Self {
        Self { webhook_handler }
    }
}

/// Handle a Stripe webhook.
///
/// POST /orders/webhook
///
/// Always answers 200; the body is `Success`, `Invalid signature` or
/// `Error`. A missing or non-ASCII signature header is verified as an
/// empty one and therefore reported as an invalid signature.
pub async fn handle_stripe_webhook(
    State(state): State<OrderAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let cmd = HandleStripeWebhookCommand {
        payload: body.to_vec(),
        signature: signature.to_string(),
    };

    let outcome = state.webhook_handler.handle(cmd).await;

    (StatusCode::OK, outcome.as_str())
}

/// GET /health
pub async fn health() -> &'static str {
    "OK"
}
