//! HTTP adapters - REST API implementations.

pub mod orders;

pub use orders::{order_router, OrderAppState};
