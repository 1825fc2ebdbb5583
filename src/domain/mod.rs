//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `order` - Cart and checkout session data
//! - `webhook` - Stripe signature verification, event model and dispatch

pub mod order;
pub mod webhook;
