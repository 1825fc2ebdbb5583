//! CheckoutOrderCompletion - Completes orders from checkout sessions.
//!
//! Persisting the order is owned by the order store, which sits outside this
//! service. This adapter resolves the buyer's cart through the resilient
//! product-service client and records what was bought.

use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::product_service::ResilientCartClient;
use crate::domain::order::CheckoutSessionCompleted;
use crate::ports::{OrderCompletion, OrderError};

/// `OrderCompletion` backed by the product service's cart endpoint.
///
/// Idempotent: completing the same session twice performs the same reads
/// and logs the same summary.
pub struct CheckoutOrderCompletion {
    carts: Arc<ResilientCartClient>,
}

impl CheckoutOrderCompletion {
    pub fn new(carts: Arc<ResilientCartClient>) -> Self {
        Self { carts }
    }
}

#[async_trait]
impl OrderCompletion for CheckoutOrderCompletion {
    async fn complete_checkout(&self, session: CheckoutSessionCompleted) -> Result<(), OrderError> {
        let Some(user_id) = session.user_reference() else {
            tracing::warn!(
                session_id = %session.id,
                "Checkout session carries no user reference, skipping cart lookup"
            );
            return Ok(());
        };

        let cart = self.carts.get_cart(user_id).await;

        if cart.is_degraded() {
            tracing::warn!(
                session_id = %session.id,
                user_id = %user_id,
                "Product service unavailable, completing order with empty cart"
            );
        }

        tracing::info!(
            session_id = %session.id,
            user_id = %user_id,
            paid = session.is_paid(),
            amount_total = ?session.amount_total,
            items = cart.items.len(),
            quantity = cart.total_quantity(),
            "Order completed"
        );

        Ok(())
    }
}
