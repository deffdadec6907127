//! Test Helpers

use std::io;

use rust_decimal::Decimal;
use serde_json::{Value, json};

use boxoffice::{
    catalog::{EventId, TicketTypeId},
    items::LineItem,
    pricing::line_total,
    storage::{Storage, StorageError},
    users::{Role, Session, User, UserId},
};

pub(crate) fn user(id: u64, role: Role) -> User {
    User {
        id: UserId::new(id),
        username: format!("user{id}"),
        email: format!("user{id}@example.com"),
        cpf: "12345678901".to_string(),
        name: format!("User {id}"),
        role,
        avatar: None,
    }
}

pub(crate) fn session(id: u64, role: Role) -> Session {
    Session {
        user: user(id, role),
        access_token: format!("token-{id}"),
        refresh_token: None,
    }
}

pub(crate) fn line(event: u64, ticket: u64, price: Decimal, quantity: u32) -> LineItem {
    LineItem {
        event_id: EventId::new(event),
        event_name: format!("Event {event}"),
        ticket_type_id: TicketTypeId::new(ticket),
        ticket_name: format!("Ticket {ticket}"),
        price,
        quantity,
        total_price: line_total(price, quantity).unwrap_or_default(),
    }
}

pub(crate) fn event_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "Open air",
        "local": "Recife",
        "date": "2025-03-25T00:00:00.000Z",
        "capacity": 100,
        "price": 50.0,
        "category_id": 1,
        "organizer": 2
    })
}

pub(crate) fn ticket_type_json(id: u64, event: u64, name: &str, price: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "",
        "price": price,
        "capacity": 50,
        "event_id": event
    })
}

/// Storage that holds nothing and refuses every write.
#[derive(Debug)]
pub(crate) struct ReadOnlyStorage;

impl Storage for ReadOnlyStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(denied(key))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Err(denied(key))
    }
}

fn denied(key: &str) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source: io::Error::from(io::ErrorKind::PermissionDenied),
    }
}
