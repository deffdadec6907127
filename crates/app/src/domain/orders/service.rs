//! Orders service.

use async_trait::async_trait;
use mockall::automock;

use boxoffice::{
    orders::{NewOrder, Order, OrderId, OrderSummary},
    users::UserId,
};

use crate::{
    api::{ApiClient, ApiError},
    domain::Create,
};

#[derive(Debug, Clone)]
pub struct HttpOrdersService {
    client: ApiClient,
}

impl HttpOrdersService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrdersService for HttpOrdersService {
    #[tracing::instrument(
        name = "orders.service.create_order",
        skip(self, order),
        fields(
            user = %order.user_id,
            event = %order.event_id,
            ticket_type = %order.ticket_type_id,
            quantity = order.quantity
        ),
        err
    )]
    async fn create_order(&self, order: NewOrder) -> Result<Order, ApiError> {
        self.client
            .post("/orders", &Create::new(&order), None)
            .await
    }

    #[tracing::instrument(name = "orders.service.list_orders", skip(self), err)]
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.client.get("/orders", None).await
    }

    #[tracing::instrument(name = "orders.service.get_order", skip(self), fields(order = %id), err)]
    async fn get_order(&self, id: OrderId) -> Result<Order, ApiError> {
        self.client.get(&format!("/orders/{id}"), None).await
    }

    #[tracing::instrument(name = "orders.service.user_orders", skip(self), fields(user = %user), err)]
    async fn user_orders(&self, user: UserId) -> Result<Vec<OrderSummary>, ApiError> {
        self.client.get(&format!("/orders/user/{user}"), None).await
    }

    #[tracing::instrument(name = "orders.service.update_order", skip(self, order), fields(order = %order.id), err)]
    async fn update_order(&self, order: Order) -> Result<Order, ApiError> {
        self.client
            .patch(&format!("/orders/{}", order.id), &order, None)
            .await
    }

    #[tracing::instrument(name = "orders.service.delete_order", skip(self), fields(order = %id), err)]
    async fn delete_order(&self, id: OrderId) -> Result<(), ApiError> {
        self.client.delete(&format!("/orders/{id}"), None).await
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Places an order.
    async fn create_order(&self, order: NewOrder) -> Result<Order, ApiError>;

    /// Lists every order.
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError>;

    /// Retrieve a single order.
    async fn get_order(&self, id: OrderId) -> Result<Order, ApiError>;

    /// Lists the orders placed by `user`, with their event and ticket type.
    async fn user_orders(&self, user: UserId) -> Result<Vec<OrderSummary>, ApiError>;

    /// Replaces an order.
    async fn update_order(&self, order: Order) -> Result<Order, ApiError>;

    /// Deletes an order.
    async fn delete_order(&self, id: OrderId) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        Mock, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    use boxoffice::{
        catalog::{EventId, TicketTypeId},
        orders::OrderStatus,
    };

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn create_order_posts_pending_order() -> TestResult {
        let ctx = TestContext::new().await;

        Mock::given(method("POST"))
            .and(path("/orders"))
            .and(body_json(json!({
                "id": 0,
                "user_id": 3,
                "event_id": 1,
                "ticket_type_id": 2,
                "quantity": 2,
                "total_price": 100.0,
                "status": "Pendente"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 11,
                "user_id": 3,
                "event_id": 1,
                "ticket_type_id": 2,
                "quantity": 2,
                "total_price": 100.0,
                "status": "Pendente"
            })))
            .expect(1)
            .mount(&ctx.server)
            .await;

        let order = HttpOrdersService::new(ctx.client)
            .create_order(NewOrder {
                user_id: UserId::new(3),
                event_id: EventId::new(1),
                ticket_type_id: TicketTypeId::new(2),
                quantity: 2,
                total_price: dec!(100),
                status: OrderStatus::Pending,
            })
            .await?;

        assert_eq!(order.id, OrderId::new(11));
        assert_eq!(order.status, OrderStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn user_orders_decode_nested_records() -> TestResult {
        let ctx = TestContext::new().await;

        Mock::given(method("GET"))
            .and(path("/orders/user/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 11,
                "user_id": 3,
                "event": {
                    "id": 1,
                    "name": "Festival",
                    "description": "",
                    "date": "2025-03-25",
                    "local": "Recife",
                    "capacity": 100,
                    "price": 50.0
                },
                "ticketType": { "id": 2, "name": "Pista", "description": "", "price": 50.0 },
                "status": "Pago",
                "quantity": 2,
                "total_price": 100.0
            }])))
            .mount(&ctx.server)
            .await;

        let orders = HttpOrdersService::new(ctx.client)
            .user_orders(UserId::new(3))
            .await?;

        assert_eq!(
            orders.first().map(|o| (o.event.name.as_str(), o.status.to_string())),
            Some(("Festival", "Pago".to_string()))
        );

        Ok(())
    }

    #[tokio::test]
    async fn server_errors_are_transient() {
        let ctx = TestContext::new().await;

        Mock::given(method("GET"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&ctx.server)
            .await;

        let result = HttpOrdersService::new(ctx.client).list_orders().await;

        assert!(
            result.as_ref().is_err_and(ApiError::is_transient),
            "got {result:?}"
        );
    }
}
