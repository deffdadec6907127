//! Checkout Errors

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

use boxoffice::{
    items::LineItem,
    orders::{Order, OrderId},
    storage::StorageError,
};

use crate::api::ApiError;

/// Errors that can occur while checking out a cart.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nobody is logged in; nothing was submitted.
    #[error("you are not logged in, run `boxoffice login` first")]
    Unauthenticated,

    /// The cart has no lines; nothing was submitted.
    #[error("your cart is empty")]
    EmptyCart,

    /// At least one order was refused; the cart was kept.
    #[error("{0}")]
    Failed(CheckoutFailure),

    /// Every order was placed but the stored cart could not be cleared.
    #[error("orders were placed but the stored cart could not be cleared")]
    CartNotCleared {
        /// Orders placed, one per cart line.
        orders: Vec<Order>,
        #[source]
        source: StorageError,
    },
}

/// An order accepted by the orders service.
#[derive(Debug)]
pub struct PlacedOrder {
    /// Index of the cart line the order was placed for.
    pub line: usize,
    pub order: Order,
}

/// A cart line whose order was refused.
#[derive(Debug)]
pub struct FailedLine {
    /// Index of the cart line.
    pub line: usize,
    pub item: LineItem,
    pub error: ApiError,
}

/// Outcome of cancelling an accepted order after a partial failure.
#[derive(Debug)]
pub struct Cancellation {
    pub order: OrderId,
    pub result: Result<(), ApiError>,
}

/// Per-line outcome of a checkout that did not fully succeed.
#[derive(Debug, Default)]
pub struct CheckoutFailure {
    pub placed: Vec<PlacedOrder>,
    pub failed: Vec<FailedLine>,
    /// Cancellations attempted for `placed`; empty unless compensation is enabled.
    pub compensation: Vec<Cancellation>,
}

impl CheckoutFailure {
    /// Accepted orders that are still live after compensation.
    pub fn outstanding_orders(&self) -> impl Iterator<Item = &Order> {
        self.placed.iter().map(|placed| &placed.order).filter(|order| {
            !self
                .compensation
                .iter()
                .any(|cancellation| cancellation.order == order.id && cancellation.result.is_ok())
        })
    }
}

impl Display for CheckoutFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let lines = self.placed.len() + self.failed.len();

        write!(
            f,
            "checkout failed: {} of {lines} orders were refused",
            self.failed.len()
        )?;

        let outstanding = self.outstanding_orders().count();

        if outstanding > 0 {
            write!(f, ", {outstanding} placed orders remain")?;
        }

        Ok(())
    }
}
