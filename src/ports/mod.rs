//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CartService` - Remote cart lookup (product service)
//! - `CircuitBreaker` - External service resilience pattern
//! - `OrderCompletion` - Marks orders paid after checkout

mod cart_service;
mod circuit_breaker;
mod order_completion;

pub use cart_service::{CartService, CartServiceError};
pub use circuit_breaker::{
    CallPermit, CircuitBreaker, CircuitBreakerConfig, CircuitBreakerMetrics, CircuitState,
};
pub use order_completion::{OrderCompletion, OrderError};
