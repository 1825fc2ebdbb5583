//! Order Service - Stripe webhook intake and resilient cart lookup
//!
//! This crate verifies and dispatches payment-provider webhooks to order
//! completion, and fetches carts from the product service behind a circuit
//! breaker with an empty-cart fallback.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
