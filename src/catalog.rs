//! Catalog Records
//!
//! Events, their categories and ticket types as the events service returns
//! them, plus the drafts organizers submit to create or edit them.

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ids::TypedId, users::UserId};

/// Event Id
pub type EventId = TypedId<Event>;

/// Category Id
pub type CategoryId = TypedId<Category>;

/// Ticket Type Id
pub type TicketTypeId = TypedId<TicketType>;

/// Event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Venue.
    #[serde(default)]
    pub local: String,
    /// Date as returned by the service; either `YYYY-MM-DD` or a full timestamp.
    pub date: String,
    pub capacity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    pub organizer: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, rename = "ticketTypes", skip_serializing_if = "Vec::is_empty")]
    pub ticket_types: Vec<TicketType>,
}

/// Fields an organizer submits when creating or editing an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub name: String,
    pub description: String,
    pub local: String,
    pub date: String,
    pub capacity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    pub organizer: UserId,
}

/// Category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Fields submitted when creating or editing a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Ticket Type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketType {
    pub id: TicketTypeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub capacity: u32,
    pub event_id: EventId,
}

/// Fields submitted when creating or editing a ticket type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketTypeDraft {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub capacity: u32,
    pub event_id: EventId,
}

/// Tickets sold for one ticket type of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketTypeSales {
    #[serde(rename = "ticketType")]
    pub ticket_type: TicketTypeSalesDetail,
}

/// Ticket Type Sales Detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketTypeSalesDetail {
    pub name: String,
    pub capacity: u32,
    pub sold: u32,
}

impl TicketTypeSalesDetail {
    /// Tickets still available, never negative.
    pub fn remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.sold)
    }
}

/// Total tickets sold for an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSalesTotal {
    #[serde(rename = "eventId")]
    pub event_id: EventId,
    #[serde(rename = "soldTickets")]
    pub sold_tickets: u32,
}

/// Parses the calendar date at the start of a service date string.
pub fn parse_date(raw: &str) -> Option<Date> {
    raw.trim().get(..10)?.parse::<Date>().ok()
}

/// Formats a service date as `dd/mm/yyyy`.
pub fn format_date(raw: &str) -> String {
    parse_date(raw).map_or_else(
        || "invalid date".to_string(),
        |date| date.strftime("%d/%m/%Y").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn event_deserializes_with_nested_listings() -> TestResult {
        let event: Event = serde_json::from_value(json!({
            "id": 3,
            "name": "Festival",
            "description": "Three stages",
            "local": "Recife",
            "date": "2025-03-25T00:00:00.000Z",
            "capacity": 500,
            "price": 80.5,
            "category_id": 2,
            "organizer": 9,
            "category": { "id": 2, "name": "Music" },
            "ticketTypes": [
                { "id": 11, "name": "VIP", "description": "", "price": 200, "capacity": 50, "event_id": 3 }
            ]
        }))?;

        assert_eq!(event.id, EventId::new(3));
        assert_eq!(event.price, dec!(80.5));
        assert_eq!(event.category.map(|c| c.name), Some("Music".to_string()));
        assert_eq!(event.ticket_types.len(), 1);

        Ok(())
    }

    #[test]
    fn event_without_optional_listings() -> TestResult {
        let event: Event = serde_json::from_value(json!({
            "id": 1,
            "name": "Show",
            "date": "2025-04-05",
            "capacity": 10,
            "price": 25,
            "organizer": 1
        }))?;

        assert!(event.category_id.is_none());
        assert!(event.ticket_types.is_empty());

        Ok(())
    }

    #[test]
    fn format_date_accepts_dates_and_timestamps() {
        assert_eq!(format_date("2025-03-25"), "25/03/2025");
        assert_eq!(format_date("2025-03-25T20:00:00.000Z"), "25/03/2025");
        assert_eq!(format_date("25/03/2025"), "invalid date");
        assert_eq!(format_date(""), "invalid date");
    }

    #[test]
    fn remaining_tickets_saturate_at_zero() {
        let detail = TicketTypeSalesDetail {
            name: "VIP".to_string(),
            capacity: 10,
            sold: 12,
        };

        assert_eq!(detail.remaining(), 0);
    }
}
