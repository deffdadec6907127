//! Events service.

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;

use boxoffice::{
    catalog::{Event, EventDraft, EventId, EventSalesTotal, TicketTypeSales},
    users::{Role, UserId},
};

use crate::{
    api::{ApiClient, ApiError},
    domain::Create,
};

/// Event draft as the events service expects it: with the caller's role.
#[derive(Debug, Serialize)]
struct EventPayload<'a> {
    #[serde(flatten)]
    draft: &'a EventDraft,
    role: Role,
}

#[derive(Debug, Clone)]
pub struct HttpEventsService {
    client: ApiClient,
}

impl HttpEventsService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EventsService for HttpEventsService {
    #[tracing::instrument(name = "events.service.create_event", skip(self, draft), err)]
    async fn create_event(&self, draft: EventDraft, role: Role) -> Result<Event, ApiError> {
        let payload = EventPayload {
            draft: &draft,
            role,
        };

        self.client
            .post("/events/", &Create::new(&payload), None)
            .await
    }

    #[tracing::instrument(name = "events.service.list_events", skip(self), err)]
    async fn list_events(&self) -> Result<Vec<Event>, ApiError> {
        self.client.get("/events", None).await
    }

    #[tracing::instrument(name = "events.service.get_event", skip(self), fields(event = %id), err)]
    async fn get_event(&self, id: EventId) -> Result<Event, ApiError> {
        self.client.get(&format!("/events/{id}"), None).await
    }

    #[tracing::instrument(
        name = "events.service.organizer_events",
        skip(self),
        fields(organizer = %organizer),
        err
    )]
    async fn organizer_events(&self, organizer: UserId) -> Result<Vec<Event>, ApiError> {
        self.client
            .get(&format!("/events/organizer/{organizer}"), None)
            .await
    }

    #[tracing::instrument(name = "events.service.ticket_sales", skip(self), fields(event = %id), err)]
    async fn ticket_sales(&self, id: EventId) -> Result<Vec<TicketTypeSales>, ApiError> {
        self.client
            .get(&format!("/events/{id}/tickets-sold-detailed"), None)
            .await
    }

    #[tracing::instrument(name = "events.service.sold_tickets", skip(self), fields(event = %id), err)]
    async fn sold_tickets(&self, id: EventId) -> Result<EventSalesTotal, ApiError> {
        self.client
            .get(&format!("/events/{id}/sold-tickets"), None)
            .await
    }

    #[tracing::instrument(
        name = "events.service.update_event",
        skip(self, draft),
        fields(event = %id),
        err
    )]
    async fn update_event(
        &self,
        id: EventId,
        draft: EventDraft,
        role: Role,
    ) -> Result<Event, ApiError> {
        let payload = EventPayload {
            draft: &draft,
            role,
        };

        self.client
            .patch(&format!("/events/{id}"), &payload, None)
            .await
    }

    #[tracing::instrument(name = "events.service.delete_event", skip(self), fields(event = %id), err)]
    async fn delete_event(&self, id: EventId) -> Result<(), ApiError> {
        self.client.delete(&format!("/events/{id}"), None).await
    }
}

#[automock]
#[async_trait]
pub trait EventsService: Send + Sync {
    /// Creates an event owned by the draft's organizer.
    async fn create_event(&self, draft: EventDraft, role: Role) -> Result<Event, ApiError>;

    /// Lists every event.
    async fn list_events(&self) -> Result<Vec<Event>, ApiError>;

    /// Retrieve a single event.
    async fn get_event(&self, id: EventId) -> Result<Event, ApiError>;

    /// Lists the events owned by `organizer`.
    async fn organizer_events(&self, organizer: UserId) -> Result<Vec<Event>, ApiError>;

    /// Tickets sold per ticket type of an event.
    async fn ticket_sales(&self, id: EventId) -> Result<Vec<TicketTypeSales>, ApiError>;

    /// Total tickets sold for an event.
    async fn sold_tickets(&self, id: EventId) -> Result<EventSalesTotal, ApiError>;

    /// Replaces the editable fields of an event.
    async fn update_event(
        &self,
        id: EventId,
        draft: EventDraft,
        role: Role,
    ) -> Result<Event, ApiError>;

    /// Deletes an event.
    async fn delete_event(&self, id: EventId) -> Result<(), ApiError>;
}
