//! App Context

use std::{io, sync::Arc};

use thiserror::Error;

use boxoffice::{
    auth::AuthGate,
    storage::Storage,
    stores::{CartStore, SessionStore},
};

use crate::{
    api::{ApiClient, ApiError},
    checkout::{CheckoutService, PartialFailurePolicy},
    config::AppConfig,
    domain::{
        categories::{CategoriesService, HttpCategoriesService},
        events::{EventsService, HttpEventsService},
        orders::{HttpOrdersService, OrdersService},
        ticket_types::{HttpTicketTypesService, TicketTypesService},
        users::{HttpUsersService, UsersService},
    },
    storage::FileStorage,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to open data directory: {0}")]
    Storage(#[source] io::Error),

    #[error("failed to build HTTP client: {0}")]
    Http(#[source] ApiError),
}

#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub events: Arc<dyn EventsService>,
    pub categories: Arc<dyn CategoriesService>,
    pub ticket_types: Arc<dyn TicketTypesService>,
    pub orders: Arc<dyn OrdersService>,
    pub carts: CartStore,
    pub sessions: SessionStore,
    pub auth: AuthGate,
    pub checkout: CheckoutService,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the data directory cannot be created or an HTTP
    /// client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let storage: Arc<dyn Storage> = Arc::new(
            FileStorage::open(&config.storage.data_dir).map_err(AppInitError::Storage)?,
        );

        let timeout = config.api.timeout();
        let identity =
            ApiClient::new(&config.api.identity_api_url, timeout).map_err(AppInitError::Http)?;
        let events =
            ApiClient::new(&config.api.events_api_url, timeout).map_err(AppInitError::Http)?;

        let orders: Arc<dyn OrdersService> = Arc::new(HttpOrdersService::new(events.clone()));

        Ok(Self::new(
            Arc::new(HttpUsersService::new(identity)),
            Arc::new(HttpEventsService::new(events.clone())),
            Arc::new(HttpCategoriesService::new(events.clone())),
            Arc::new(HttpTicketTypesService::new(events)),
            orders,
            storage,
            config.checkout.partial_failure,
        ))
    }

    /// Assemble a context from already-built services.
    #[must_use]
    pub fn new(
        users: Arc<dyn UsersService>,
        events: Arc<dyn EventsService>,
        categories: Arc<dyn CategoriesService>,
        ticket_types: Arc<dyn TicketTypesService>,
        orders: Arc<dyn OrdersService>,
        storage: Arc<dyn Storage>,
        policy: PartialFailurePolicy,
    ) -> Self {
        let carts = CartStore::new(Arc::clone(&storage));
        let sessions = SessionStore::new(storage);

        Self {
            checkout: CheckoutService::new(Arc::clone(&orders), carts.clone(), policy),
            auth: AuthGate::new(sessions.clone()),
            users,
            events,
            categories,
            ticket_types,
            orders,
            carts,
            sessions,
        }
    }
}
