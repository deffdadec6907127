//! Persisted Stores
//!
//! Typed views over [`Storage`](crate::storage::Storage) for the records that
//! survive between runs: the cart and the logged in session.

mod cart;
mod session;

pub use cart::{CART_KEY, CartStore};
pub use session::{SESSION_KEY, SessionStore};
