//! CartService port - Remote cart lookup against the product service.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::order::Cart;

/// Errors from a single cart lookup attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartServiceError {
    #[error("Cart request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Cart service returned status {0}")]
    UnexpectedStatus(u16),

    #[error("Cart service unreachable: {0}")]
    Network(String),

    #[error("Invalid cart response: {0}")]
    InvalidResponse(String),
}

impl CartServiceError {
    /// Whether the error says something about the health of the remote
    /// service. Client-side errors (4xx) do not.
    pub fn indicates_unhealthy_service(&self) -> bool {
        match self {
            CartServiceError::UnexpectedStatus(status) => {
                !(400..500).contains(status) || *status == 408 || *status == 429
            }
            _ => true,
        }
    }
}

/// Port for fetching a user's cart.
///
/// Read-only: dropping the returned future abandons the request with no
/// side effects.
#[async_trait]
pub trait CartService: Send + Sync {
    async fn fetch_cart(&self, user_id: &str) -> Result<Cart, CartServiceError>;
}
