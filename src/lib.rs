//! Box Office
//!
//! Box Office is the core of a ticket marketplace client: the catalog and order
//! records exchanged with the backend services, a persisted shopping cart that
//! merges lines per event ticket type, validated forms, and the session that
//! gates buying and catalog management.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod forms;
pub mod ids;
pub mod items;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod selector;
pub mod storage;
pub mod stores;
pub mod summary;
pub mod users;
