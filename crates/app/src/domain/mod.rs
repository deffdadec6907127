//! Backend Service Clients

use serde::Serialize;

pub mod categories;
pub mod events;
pub mod orders;
pub mod ticket_types;
pub mod users;

/// Body of a create request: the record with the placeholder id the services
/// expect in place of one they assign.
#[derive(Debug, Serialize)]
pub(crate) struct Create<'a, T: Serialize> {
    id: u64,
    #[serde(flatten)]
    record: &'a T,
}

impl<'a, T: Serialize> Create<'a, T> {
    pub(crate) fn new(record: &'a T) -> Self {
        Self { id: 0, record }
    }
}
