//! Order domain - Data carried between the payment provider, the product
//! service and order completion.

mod cart;
mod checkout;

pub use cart::{Cart, CartItem};
pub use checkout::CheckoutSessionCompleted;
