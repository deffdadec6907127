//! Box Office prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    auth::{AuthError, AuthGate},
    cart::Cart,
    catalog::{
        Category, CategoryDraft, CategoryId, Event, EventDraft, EventId, EventSalesTotal,
        TicketType, TicketTypeDraft, TicketTypeId, TicketTypeSales, format_date,
    },
    forms::{
        CategoryForm, EventForm, FieldError, FieldErrors, Form, FormField, LoginForm,
        ProfileForm, RegistrationForm, TicketTypeForm,
    },
    ids::TypedId,
    items::{LineItem, LineKey},
    orders::{NewOrder, Order, OrderId, OrderStatus, OrderSummary, search_history},
    pricing::{format_price, line_total, parse_price_input, total_price},
    selector::TicketSelector,
    storage::{MemoryStorage, Storage, StorageError},
    stores::{CartStore, SessionStore},
    users::{Credentials, NewUser, Role, Session, User, UserId, UserUpdate},
};
