//! Order Records

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{EventId, TicketTypeId},
    ids::TypedId,
    items::LineItem,
    users::UserId,
};

/// Order Id
pub type OrderId = TypedId<Order>;

/// Lifecycle status of an order as the orders service reports it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    /// Submitted, awaiting payment.
    Pending,

    /// Any status set by the orders service after submission.
    Other(String),
}

impl OrderStatus {
    const PENDING: &'static str = "Pendente";

    /// Wire value of the status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => Self::PENDING,
            Self::Other(status) => status,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        if value == Self::PENDING {
            Self::Pending
        } else {
            Self::Other(value)
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => OrderStatus::PENDING.to_string(),
            OrderStatus::Other(status) => status,
        }
    }
}

/// Order payload submitted for one cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub user_id: UserId,
    pub event_id: EventId,
    pub ticket_type_id: TicketTypeId,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub status: OrderStatus,
}

impl NewOrder {
    /// Pending order for everything on `item`.
    pub fn for_line(user_id: UserId, item: &LineItem) -> Self {
        Self {
            user_id,
            event_id: item.event_id,
            ticket_type_id: item.ticket_type_id,
            quantity: item.quantity,
            total_price: item.total_price,
            status: OrderStatus::Pending,
        }
    }
}

/// Order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub ticket_type_id: TicketTypeId,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub status: OrderStatus,
}

/// Order as listed in a user's order history, with its event and ticket
/// type expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub user_id: UserId,
    pub event: OrderedEvent,
    #[serde(rename = "ticketType")]
    pub ticket_type: OrderedTicketType,
    pub status: OrderStatus,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

/// Ordered Event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedEvent {
    pub id: EventId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
    #[serde(default)]
    pub local: String,
    pub capacity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Ordered Ticket Type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedTicketType {
    pub id: TicketTypeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Order history filtered by a case-insensitive event name search and
/// sorted by event name.
pub fn search_history(orders: Vec<OrderSummary>, query: &str) -> Vec<OrderSummary> {
    let query = query.to_lowercase();

    let mut matching: Vec<OrderSummary> = orders
        .into_iter()
        .filter(|order| order.event.name.to_lowercase().contains(&query))
        .collect();

    matching.sort_by_cached_key(|order| order.event.name.to_lowercase());

    matching
}
