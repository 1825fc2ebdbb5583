//! Cart lookup with circuit breaker and fallback.

use std::sync::Arc;

use crate::adapters::resilience::{call_with_fallback, CallFailure, FallbackPolicy};
use crate::domain::order::Cart;
use crate::ports::{CartService, CartServiceError, CircuitBreaker};

/// Fetches carts, degrading to [`Cart::unavailable`] instead of failing.
///
/// Timeouts, error responses, connection failures and an open circuit all
/// produce the empty cart. Client errors (4xx other than 408/429) also
/// return the empty cart but do not count against the breaker.
pub struct ResilientCartClient {
    service: Arc<dyn CartService>,
    breaker: Arc<dyn CircuitBreaker>,
}

impl ResilientCartClient {
    pub fn new(service: Arc<dyn CartService>, breaker: Arc<dyn CircuitBreaker>) -> Self {
        Self { service, breaker }
    }

    /// The breaker guarding the product service.
    pub fn breaker(&self) -> &dyn CircuitBreaker {
        self.breaker.as_ref()
    }

    pub async fn get_cart(&self, user_id: &str) -> Cart {
        let policy = fallback_policy(user_id);
        call_with_fallback(self.breaker.as_ref(), &policy, || {
            self.service.fetch_cart(user_id)
        })
        .await
    }
}

fn fallback_policy(user_id: &str) -> FallbackPolicy<Cart, CartServiceError> {
    let user_id = user_id.to_string();
    FallbackPolicy::new(move |failure: &CallFailure<CartServiceError>| {
        tracing::warn!(
            user_id = %user_id,
            reason = %failure,
            "Cart lookup failed, using empty cart"
        );
        Cart::unavailable(user_id.clone())
    })
    .with_failure_classifier(CartServiceError::indicates_unhealthy_service)
}
