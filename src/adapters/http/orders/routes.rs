//! Route configuration for order endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{handle_stripe_webhook, health, OrderAppState};

/// Webhook routes, mounted under `/orders`.
///
/// Routes:
/// - `POST /webhook` - Handle Stripe webhooks (no auth, signature verified)
pub fn webhook_routes() -> Router<OrderAppState> {
    Router::new().route("/webhook", post(handle_stripe_webhook))
}

/// Creates the complete order service router.
///
/// Routes:
/// - `POST /orders/webhook`
/// - `GET /health`
pub fn order_router() -> Router<OrderAppState> {
    Router::new()
        .nest("/orders", webhook_routes())
        .route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::HandleStripeWebhookHandler;
    use crate::domain::webhook::{
        sign_payload, StripeEvent, StripeEventType, StripeWebhookVerifier, WebhookError,
        WebhookEventHandler, WebhookHandlerRegistry,
    };
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    const SECRET: &str = "whsec_routes_test";

    // ───────────────────────────────────────────────────────────────
    // Mock Implementations
    // ───────────────────────────────────────────────────────────────

    struct CountingHandler {
        calls: AtomicU32,
        fail: bool,
    }

    #[async_trait]
    impl WebhookEventHandler for CountingHandler {
        fn handles(&self) -> Vec<StripeEventType> {
            vec![StripeEventType::CheckoutSessionCompleted]
        }

        async fn handle(&self, _event: &StripeEvent) -> Result<(), WebhookError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(WebhookError::HandlerFailed("boom".to_string()));
            }
            Ok(())
        }
    }

    fn app(fail: bool) -> (Router, Arc<CountingHandler>) {
        let handler = Arc::new(CountingHandler {
            calls: AtomicU32::new(0),
            fail,
        });
        let registry = WebhookHandlerRegistry::new().register(handler.clone());
        let webhook_handler = Arc::new(HandleStripeWebhookHandler::new(
            StripeWebhookVerifier::new(SECRET),
            registry,
        ));
        let app = order_router().with_state(OrderAppState::new(webhook_handler));
        (app, handler)
    }

    fn checkout_payload() -> Vec<u8> {
        serde_json::json!({
            "id": "evt_1",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "livemode": false,
            "data": { "object": { "id": "cs_test_1", "client_reference_id": "user-1" } }
        })
        .to_string()
        .into_bytes()
    }

    fn webhook_request(payload: Vec<u8>, signature: Option<String>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/orders/webhook")
            .header("content-type", "application/json");
        if let Some(signature) = signature {
            builder = builder.header("Stripe-Signature", signature);
        }
        builder.body(Body::from(payload)).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    // ───────────────────────────────────────────────────────────────
    // Tests
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn signed_webhook_returns_success() {
        let (app, handler) = app(false);
        let payload = checkout_payload();
        let signature = sign_payload(SECRET, chrono::Utc::now().timestamp(), &payload);

        let response = app
            .oneshot(webhook_request(payload, Some(signature)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Success");
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn wrong_secret_returns_invalid_signature_with_ok_status() {
        let (app, handler) = app(false);
        let payload = checkout_payload();
        let signature = sign_payload("whsec_other", chrono::Utc::now().timestamp(), &payload);

        let response = app
            .oneshot(webhook_request(payload, Some(signature)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Invalid signature");
        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_signature_header_returns_invalid_signature() {
        let (app, handler) = app(false);

        let response = app
            .oneshot(webhook_request(checkout_payload(), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Invalid signature");
        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failing_handler_returns_error_with_ok_status() {
        let (app, _handler) = app(true);
        let payload = checkout_payload();
        let signature = sign_payload(SECRET, chrono::Utc::now().timestamp(), &payload);

        let response = app
            .oneshot(webhook_request(payload, Some(signature)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Error");
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let (app, _handler) = app(false);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "OK");
    }

    #[tokio::test]
    async fn webhook_route_rejects_get() {
        let (app, _handler) = app(false);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/orders/webhook")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
