//! Checkout

pub mod errors;
pub mod service;

pub use errors::*;
pub use service::*;
