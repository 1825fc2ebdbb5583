//! Order adapters - `OrderCompletion` implementations.

mod checkout_order_completion;

pub use checkout_order_completion::CheckoutOrderCompletion;
