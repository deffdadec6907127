//! Users

pub mod service;

pub use service::*;
