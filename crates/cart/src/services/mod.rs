//! Business logic for the cart service.

pub mod cart;

pub use cart::{CartError, CartService};
