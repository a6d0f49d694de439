//! Shopping cart module.
//!
//! Contains the line item types and the pure mutation logic. Nothing here
//! performs I/O; see [`crate::store`] for the persistent, shared store.

#[allow(clippy::module_inception)]
mod cart;
mod item;

pub use cart::{Cart, Decrement};
pub use item::{CartItem, NewCartItem};
