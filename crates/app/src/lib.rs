//! Box Office application: HTTP clients for the identity and events
//! services, file-backed local state, and checkout.

pub mod api;
pub mod checkout;
pub mod config;
pub mod context;
pub mod domain;
pub mod observability;
pub mod storage;

#[cfg(test)]
mod test;
