//! OrderCompletion port - Marks an order paid once checkout completes.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::order::CheckoutSessionCompleted;

/// Errors raised by order completion.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found for checkout session {0}")]
    NotFound(String),

    #[error("Order completion failed: {0}")]
    Infrastructure(String),
}

/// Port for completing an order after a successful checkout.
///
/// Stripe may deliver the same event more than once and nothing upstream
/// deduplicates, so implementations must be idempotent per session id.
#[async_trait]
pub trait OrderCompletion: Send + Sync {
    async fn complete_checkout(&self, session: CheckoutSessionCompleted) -> Result<(), OrderError>;
}
