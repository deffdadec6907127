//! Ticket types service.

use async_trait::async_trait;
use mockall::automock;

use boxoffice::catalog::{EventId, TicketType, TicketTypeDraft, TicketTypeId};

use crate::{
    api::{ApiClient, ApiError},
    domain::Create,
};

#[derive(Debug, Clone)]
pub struct HttpTicketTypesService {
    client: ApiClient,
}

impl HttpTicketTypesService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TicketTypesService for HttpTicketTypesService {
    #[tracing::instrument(
        name = "ticket_types.service.create_ticket_type",
        skip(self, draft),
        fields(event = %draft.event_id),
        err
    )]
    async fn create_ticket_type(&self, draft: TicketTypeDraft) -> Result<TicketType, ApiError> {
        self.client.post("/types/", &Create::new(&draft), None).await
    }

    #[tracing::instrument(name = "ticket_types.service.list_ticket_types", skip(self), err)]
    async fn list_ticket_types(&self) -> Result<Vec<TicketType>, ApiError> {
        self.client.get("/types", None).await
    }

    #[tracing::instrument(
        name = "ticket_types.service.get_ticket_type",
        skip(self),
        fields(ticket_type = %id),
        err
    )]
    async fn get_ticket_type(&self, id: TicketTypeId) -> Result<TicketType, ApiError> {
        self.client.get(&format!("/types/{id}"), None).await
    }

    #[tracing::instrument(
        name = "ticket_types.service.event_ticket_types",
        skip(self),
        fields(event = %event),
        err
    )]
    async fn event_ticket_types(&self, event: EventId) -> Result<Vec<TicketType>, ApiError> {
        self.client.get(&format!("/types/event/{event}"), None).await
    }

    #[tracing::instrument(
        name = "ticket_types.service.update_ticket_type",
        skip(self, draft),
        fields(ticket_type = %id),
        err
    )]
    async fn update_ticket_type(
        &self,
        id: TicketTypeId,
        draft: TicketTypeDraft,
    ) -> Result<TicketType, ApiError> {
        self.client
            .patch(&format!("/types/{id}"), &draft, None)
            .await
    }

    #[tracing::instrument(
        name = "ticket_types.service.delete_ticket_type",
        skip(self),
        fields(ticket_type = %id),
        err
    )]
    async fn delete_ticket_type(&self, id: TicketTypeId) -> Result<(), ApiError> {
        self.client.delete(&format!("/types/{id}"), None).await
    }
}

#[automock]
#[async_trait]
pub trait TicketTypesService: Send + Sync {
    /// Creates a ticket type for the draft's event.
    async fn create_ticket_type(&self, draft: TicketTypeDraft) -> Result<TicketType, ApiError>;

    /// Lists every ticket type.
    async fn list_ticket_types(&self) -> Result<Vec<TicketType>, ApiError>;

    /// Retrieve a single ticket type.
    async fn get_ticket_type(&self, id: TicketTypeId) -> Result<TicketType, ApiError>;

    /// Lists the ticket types sold for `event`.
    async fn event_ticket_types(&self, event: EventId) -> Result<Vec<TicketType>, ApiError>;

    /// Replaces the fields of a ticket type.
    async fn update_ticket_type(
        &self,
        id: TicketTypeId,
        draft: TicketTypeDraft,
    ) -> Result<TicketType, ApiError>;

    /// Deletes a ticket type.
    async fn delete_ticket_type(&self, id: TicketTypeId) -> Result<(), ApiError>;
}
