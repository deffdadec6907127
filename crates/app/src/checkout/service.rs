//! Checkout service.
//!
//! Turns every cart line into one order. Orders are submitted concurrently
//! and every outcome is awaited before the cart is cleared or kept.

use std::sync::Arc;

use futures::future::join_all;
use rust_decimal::Decimal;
use tracing::{info, warn};

use boxoffice::{
    cart::Cart,
    orders::{NewOrder, Order},
    stores::CartStore,
    users::UserId,
};

use crate::domain::orders::OrdersService;

use super::{Cancellation, CheckoutError, CheckoutFailure, FailedLine, PlacedOrder};

/// What to do with accepted orders when another order of the same checkout
/// is refused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum PartialFailurePolicy {
    /// Keep the accepted orders and report them.
    #[default]
    Report,

    /// Delete the accepted orders.
    Compensate,
}

/// Orders placed by a successful checkout.
#[derive(Debug)]
pub struct CheckoutReceipt {
    /// One order per cart line, in cart order.
    pub orders: Vec<Order>,
    pub total: Decimal,
}

#[derive(Clone)]
pub struct CheckoutService {
    orders: Arc<dyn OrdersService>,
    cart_store: CartStore,
    policy: PartialFailurePolicy,
}

impl CheckoutService {
    #[must_use]
    pub fn new(
        orders: Arc<dyn OrdersService>,
        cart_store: CartStore,
        policy: PartialFailurePolicy,
    ) -> Self {
        Self {
            orders,
            cart_store,
            policy,
        }
    }

    /// Places one pending order per cart line for `user`.
    ///
    /// The stored and in-memory carts are cleared only when every order is
    /// accepted; otherwise both are left as they were.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Unauthenticated`] or [`CheckoutError::EmptyCart`]
    /// without submitting anything, [`CheckoutError::Failed`] when any order is
    /// refused, and [`CheckoutError::CartNotCleared`] when the orders were placed
    /// but the stored cart could not be removed.
    #[tracing::instrument(
        name = "checkout.service.checkout",
        skip_all,
        fields(lines = cart.len(), user = tracing::field::Empty),
        err
    )]
    pub async fn checkout(
        &self,
        cart: &mut Cart,
        user: Option<UserId>,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let Some(user) = user else {
            return Err(CheckoutError::Unauthenticated);
        };

        tracing::Span::current().record("user", tracing::field::display(user));

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let submissions = cart
            .items()
            .iter()
            .map(|item| self.orders.create_order(NewOrder::for_line(user, item)));

        let outcomes = join_all(submissions).await;

        let mut placed = Vec::new();
        let mut failed = Vec::new();

        for (line, (item, outcome)) in cart.items().iter().zip(outcomes).enumerate() {
            match outcome {
                Ok(order) => placed.push(PlacedOrder { line, order }),
                Err(error) => {
                    warn!(line, event = %item.event_id, ticket_type = %item.ticket_type_id, %error, "order refused");

                    failed.push(FailedLine {
                        line,
                        item: item.clone(),
                        error,
                    });
                }
            }
        }

        if !failed.is_empty() {
            let compensation = match self.policy {
                PartialFailurePolicy::Report => Vec::new(),
                PartialFailurePolicy::Compensate => self.cancel(&placed).await,
            };

            return Err(CheckoutError::Failed(CheckoutFailure {
                placed,
                failed,
                compensation,
            }));
        }

        let total = cart.total();
        let orders: Vec<Order> = placed.into_iter().map(|placed| placed.order).collect();

        let cleared = self.cart_store.clear();

        cart.clear();

        if let Err(source) = cleared {
            return Err(CheckoutError::CartNotCleared { orders, source });
        }

        info!(orders = orders.len(), %total, "checkout complete");

        Ok(CheckoutReceipt { orders, total })
    }

    async fn cancel(&self, placed: &[PlacedOrder]) -> Vec<Cancellation> {
        let cancellations = placed.iter().map(|placed| async move {
            let order = placed.order.id;
            let result = self.orders.delete_order(order).await;

            if let Err(error) = &result {
                warn!(%order, %error, "failed to cancel order");
            }

            Cancellation { order, result }
        });

        join_all(cancellations).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::dec;
    use testresult::TestResult;

    use boxoffice::{
        catalog::TicketTypeId,
        orders::{OrderId, OrderStatus},
        storage::{MemoryStorage, Storage},
        stores::CART_KEY,
    };

    use crate::{
        api::ApiError,
        domain::orders::MockOrdersService,
        test::helpers::{ReadOnlyStorage, line},
    };

    use super::*;

    fn accepted(order: &NewOrder) -> Order {
        Order {
            id: OrderId::new(100 + order.ticket_type_id.get()),
            user_id: order.user_id,
            event_id: order.event_id,
            ticket_type_id: order.ticket_type_id,
            quantity: order.quantity,
            total_price: order.total_price,
            status: order.status.clone(),
        }
    }

    fn refused() -> ApiError {
        ApiError::Rejected {
            status: 409,
            message: "sold out".to_string(),
        }
    }

    fn stored_cart() -> TestResult<(Arc<MemoryStorage>, CartStore, Cart)> {
        let storage = Arc::new(MemoryStorage::new());
        let store = CartStore::new(storage.clone());
        let mut cart = Cart::new();

        store.add_items(
            &mut cart,
            [
                line(1, 1, dec!(10), 2),
                line(1, 2, dec!(25), 1),
                line(2, 3, dec!(40), 3),
            ],
        )?;

        Ok((storage, store, cart))
    }

    #[tokio::test]
    async fn anonymous_checkout_submits_nothing() -> TestResult {
        let (_, store, mut cart) = stored_cart()?;
        let mut orders = MockOrdersService::new();

        orders.expect_create_order().never();

        let service = CheckoutService::new(Arc::new(orders), store, PartialFailurePolicy::Report);
        let result = service.checkout(&mut cart, None).await;

        assert!(
            matches!(result, Err(CheckoutError::Unauthenticated)),
            "got {result:?}"
        );
        assert_eq!(cart.len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_submits_nothing() {
        let mut orders = MockOrdersService::new();

        orders.expect_create_order().never();

        let store = CartStore::new(Arc::new(MemoryStorage::new()));
        let service = CheckoutService::new(Arc::new(orders), store, PartialFailurePolicy::Report);
        let result = service.checkout(&mut Cart::new(), Some(UserId::new(1))).await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)), "got {result:?}");
    }

    #[tokio::test]
    async fn successful_checkout_places_one_order_per_line_and_clears_cart() -> TestResult {
        let (storage, store, mut cart) = stored_cart()?;
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .withf(|order| order.user_id == UserId::new(7) && order.status == OrderStatus::Pending)
            .times(3)
            .returning(|order| Ok(accepted(&order)));

        let service = CheckoutService::new(Arc::new(orders), store, PartialFailurePolicy::Report);
        let receipt = service.checkout(&mut cart, Some(UserId::new(7))).await?;

        assert_eq!(receipt.orders.len(), 3);
        assert_eq!(receipt.total, dec!(165));
        assert!(cart.is_empty());
        assert_eq!(storage.get(CART_KEY)?, None);

        Ok(())
    }

    #[tokio::test]
    async fn partial_failure_keeps_cart_and_reports_each_line() -> TestResult {
        let (storage, store, mut cart) = stored_cart()?;
        let before = storage.get(CART_KEY)?;
        let mut orders = MockOrdersService::new();

        orders.expect_create_order().times(3).returning(|order| {
            if order.ticket_type_id == TicketTypeId::new(2) {
                Err(refused())
            } else {
                Ok(accepted(&order))
            }
        });
        orders.expect_delete_order().never();

        let service = CheckoutService::new(Arc::new(orders), store, PartialFailurePolicy::Report);
        let result = service.checkout(&mut cart, Some(UserId::new(7))).await;

        let Err(CheckoutError::Failed(failure)) = &result else {
            return Err(format!("expected a checkout failure, got {result:?}").into());
        };

        assert_eq!(
            failure.placed.iter().map(|p| p.line).collect::<Vec<_>>(),
            [0, 2]
        );
        assert_eq!(
            failure.failed.iter().map(|f| f.line).collect::<Vec<_>>(),
            [1]
        );
        assert!(failure.compensation.is_empty());
        assert_eq!(failure.outstanding_orders().count(), 2);
        assert_eq!(cart.len(), 3);
        assert_eq!(storage.get(CART_KEY)?, before);

        Ok(())
    }

    #[tokio::test]
    async fn compensation_cancels_accepted_orders() -> TestResult {
        let (_, store, mut cart) = stored_cart()?;
        let mut orders = MockOrdersService::new();

        orders.expect_create_order().times(3).returning(|order| {
            if order.ticket_type_id == TicketTypeId::new(3) {
                Err(refused())
            } else {
                Ok(accepted(&order))
            }
        });
        orders
            .expect_delete_order()
            .withf(|id| *id == OrderId::new(101) || *id == OrderId::new(102))
            .times(2)
            .returning(|_| Ok(()));

        let service =
            CheckoutService::new(Arc::new(orders), store, PartialFailurePolicy::Compensate);
        let result = service.checkout(&mut cart, Some(UserId::new(7))).await;

        let Err(CheckoutError::Failed(failure)) = &result else {
            return Err(format!("expected a checkout failure, got {result:?}").into());
        };

        assert_eq!(failure.compensation.len(), 2);
        assert_eq!(failure.outstanding_orders().count(), 0);
        assert_eq!(cart.len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn failing_to_clear_stored_cart_still_returns_orders() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .times(1)
            .returning(|order| Ok(accepted(&order)));

        let store = CartStore::new(Arc::new(ReadOnlyStorage));
        let mut cart = Cart::with_items([line(1, 1, dec!(10), 1)]);
        let service = CheckoutService::new(Arc::new(orders), store, PartialFailurePolicy::Report);

        let result = service.checkout(&mut cart, Some(UserId::new(7))).await;

        assert!(
            matches!(&result, Err(CheckoutError::CartNotCleared { orders, .. }) if orders.len() == 1),
            "got {result:?}"
        );

        Ok(())
    }
}
