//! Catalog Forms
//!
//! What organizers fill in to create or edit events, categories and ticket
//! types.

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;

use crate::{
    catalog::{
        Category, CategoryDraft, CategoryId, Event, EventDraft, EventId, TicketType,
        TicketTypeDraft,
    },
    users::UserId,
};

use super::{
    FieldError, Form, FormField,
    validators::{count, date, required},
};

fn non_negative(price: Decimal) -> Result<(), FieldError> {
    if price < Decimal::ZERO {
        Err(FieldError::BelowMinimum(0))
    } else {
        Ok(())
    }
}

fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();

    (!value.is_empty()).then(|| value.to_string())
}

/// Event Field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventField {
    Name,
    Local,
    Date,
    Capacity,
    Price,
}

impl FormField for EventField {
    const ALL: &'static [Self] = &[
        Self::Name,
        Self::Local,
        Self::Date,
        Self::Capacity,
        Self::Price,
    ];
}

impl Display for EventField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Name => "name",
            Self::Local => "local",
            Self::Date => "date",
            Self::Capacity => "capacity",
            Self::Price => "price",
        })
    }
}

/// Event form.
#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    pub name: String,
    pub description: String,
    pub local: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub capacity: i64,
    pub price: Decimal,
    pub category_id: Option<CategoryId>,
    pub organizer: UserId,
}

impl EventForm {
    /// Empty form for a new event owned by `organizer`.
    pub fn new(organizer: UserId) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            local: String::new(),
            date: String::new(),
            capacity: 0,
            price: Decimal::ZERO,
            category_id: None,
            organizer,
        }
    }
}

impl From<&Event> for EventForm {
    fn from(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            description: event.description.clone(),
            local: event.local.clone(),
            date: event.date.get(..10).unwrap_or(&event.date).to_string(),
            capacity: i64::from(event.capacity),
            price: event.price,
            category_id: event.category_id,
            organizer: event.organizer,
        }
    }
}

impl Form for EventForm {
    type Field = EventField;
    type Output = EventDraft;

    fn check(&self, field: Self::Field) -> Result<(), FieldError> {
        match field {
            EventField::Name => required(&self.name),
            EventField::Local => required(&self.local),
            EventField::Date => date(&self.date),
            EventField::Capacity => count(self.capacity, 1).map(|_| ()),
            EventField::Price => non_negative(self.price),
        }
    }

    fn build(&self) -> Self::Output {
        EventDraft {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            local: self.local.trim().to_string(),
            date: self.date.trim().to_string(),
            capacity: count(self.capacity, 1).unwrap_or_default(),
            price: self.price,
            category_id: self.category_id,
            organizer: self.organizer,
        }
    }
}

/// Category Field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryField {
    Name,
}

impl FormField for CategoryField {
    const ALL: &'static [Self] = &[Self::Name];
}

impl Display for CategoryField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("name")
    }
}

/// Category form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
}

impl From<&Category> for CategoryForm {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
        }
    }
}

impl Form for CategoryForm {
    type Field = CategoryField;
    type Output = CategoryDraft;

    fn check(&self, field: Self::Field) -> Result<(), FieldError> {
        match field {
            CategoryField::Name => required(&self.name),
        }
    }

    fn build(&self) -> Self::Output {
        CategoryDraft {
            name: self.name.trim().to_string(),
            description: optional_text(&self.description),
        }
    }
}

/// Ticket Type Field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TicketTypeField {
    Name,
    Event,
    Capacity,
    Price,
}

impl FormField for TicketTypeField {
    const ALL: &'static [Self] = &[Self::Name, Self::Event, Self::Capacity, Self::Price];
}

impl Display for TicketTypeField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Name => "name",
            Self::Event => "event",
            Self::Capacity => "capacity",
            Self::Price => "price",
        })
    }
}

/// Ticket type form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketTypeForm {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub capacity: i64,
    pub event_id: EventId,
}

impl From<&TicketType> for TicketTypeForm {
    fn from(ticket_type: &TicketType) -> Self {
        Self {
            name: ticket_type.name.clone(),
            description: ticket_type.description.clone(),
            price: ticket_type.price,
            capacity: i64::from(ticket_type.capacity),
            event_id: ticket_type.event_id,
        }
    }
}

impl Form for TicketTypeForm {
    type Field = TicketTypeField;
    type Output = TicketTypeDraft;

    fn check(&self, field: Self::Field) -> Result<(), FieldError> {
        match field {
            TicketTypeField::Name => required(&self.name),
            TicketTypeField::Event if self.event_id.is_placeholder() => Err(FieldError::Required),
            TicketTypeField::Event => Ok(()),
            TicketTypeField::Capacity => count(self.capacity, 1).map(|_| ()),
            TicketTypeField::Price => non_negative(self.price),
        }
    }

    fn build(&self) -> Self::Output {
        TicketTypeDraft {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price,
            capacity: count(self.capacity, 1).unwrap_or_default(),
            event_id: self.event_id,
        }
    }
}
