//! Product service adapters.
//!
//! - `HttpCartService` - `CartService` over HTTP (reqwest)
//! - `ResilientCartClient` - Cart lookup behind a circuit breaker with an
//!   empty-cart fallback

mod http_cart_service;
mod resilient_client;

pub use http_cart_service::{HttpCartService, HttpCartServiceConfig};
pub use resilient_client::ResilientCartClient;
