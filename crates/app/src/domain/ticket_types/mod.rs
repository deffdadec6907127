//! Ticket Types

pub mod service;

pub use service::*;
