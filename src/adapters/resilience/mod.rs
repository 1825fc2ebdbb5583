//! Resilience adapters.
//!
//! - `RollingWindowCircuitBreaker` - In-process `CircuitBreaker` implementation
//! - `FallbackPolicy` / `call_with_fallback` - Runs a call behind a breaker and
//!   substitutes a fallback value on failure

mod fallback;
mod rolling_circuit_breaker;

pub use fallback::{call_with_fallback, CallFailure, FallbackPolicy};
pub use rolling_circuit_breaker::RollingWindowCircuitBreaker;
