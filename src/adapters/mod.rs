//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum routes for the webhook and health endpoints
//! - `orders` - `OrderCompletion` implementation
//! - `product_service` - HTTP cart client and its resilient wrapper
//! - `resilience` - Circuit breaker and fallback execution

pub mod http;
pub mod orders;
pub mod product_service;
pub mod resilience;

pub use http::{order_router, OrderAppState};
pub use orders::CheckoutOrderCompletion;
pub use product_service::{HttpCartService, HttpCartServiceConfig, ResilientCartClient};
pub use resilience::{call_with_fallback, CallFailure, FallbackPolicy, RollingWindowCircuitBreaker};
