//! Events

pub mod service;

pub use service::*;
