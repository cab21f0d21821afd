//! Order service: the only entry point for reading and changing orders.

use common::{OrderId, OrderStatus};
use order_store::{NewOrder, OrderStore, OrderStoreError, Page, UpdateOptions};

use crate::error::DomainError;

use super::{CancelOrder, CancelOutcome, CreateOrder, ListOrders, Order};

/// How many read-modify-write rounds a cancel gets before a version
/// conflict is returned to the caller.
pub const MAX_CANCEL_ATTEMPTS: u32 = 3;

impl From<super::OrderError> for DomainError {
    fn from(e: super::OrderError) -> Self {
        DomainError::Order(e)
    }
}

/// Service for managing orders.
///
/// Holds no state besides the store; every cross-request coordination
/// goes through the store's versioned update.
pub struct OrderService<S: OrderStore> {
    store: S,
}

impl<S: OrderStore> OrderService<S> {
    /// Creates a new order service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a new order in the `CREATED` status.
    #[tracing::instrument(skip(self), fields(total_amount = %cmd.total_amount))]
    pub async fn create_order(&self, cmd: CreateOrder) -> Result<Order, DomainError> {
        let record = self
            .store
            .insert(NewOrder::created(cmd.total_amount.value()))
            .await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(order_id = %record.id, "order created");
        Ok(record.into())
    }

    /// Loads an order by ID, failing with `NotFound` if it doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, order_id: OrderId) -> Result<Order, DomainError> {
        self.store
            .get(order_id)
            .await?
            .map(Order::from)
            .ok_or(DomainError::NotFound { order_id })
    }

    /// Cancels an order.
    ///
    /// Cancelling a cancelled order returns it unchanged without a write.
    /// The write is conditional on the version that was read; when another
    /// writer got there first the order is re-read and the decision made
    /// again, up to [`MAX_CANCEL_ATTEMPTS`] times.
    #[tracing::instrument(skip(self), fields(order_id = %cmd.order_id))]
    pub async fn cancel_order(&self, cmd: CancelOrder) -> Result<Order, DomainError> {
        let order_id = cmd.order_id;
        let mut attempt = 1;

        loop {
            let order = self.get_order(order_id).await?;

            if order.cancel()? == CancelOutcome::AlreadyCancelled {
                metrics::counter!("orders_cancel_noop_total").increment(1);
                tracing::debug!("order already cancelled");
                return Ok(order);
            }

            let result = self
                .store
                .update_status(
                    order_id,
                    OrderStatus::Cancelled,
                    UpdateOptions::expect_version(order.version()),
                )
                .await;

            match result {
                Ok(record) => {
                    metrics::counter!("orders_cancelled_total").increment(1);
                    tracing::info!(version = %record.version, "order cancelled");
                    return Ok(record.into());
                }
                Err(OrderStoreError::ConcurrencyConflict {
                    expected, actual, ..
                }) if attempt < MAX_CANCEL_ATTEMPTS => {
                    metrics::counter!("order_cancel_conflicts_total").increment(1);
                    tracing::warn!(%expected, %actual, attempt, "version conflict, re-reading order");
                    attempt += 1;
                }
                Err(OrderStoreError::NotFound(_)) => {
                    return Err(DomainError::NotFound { order_id });
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Lists a page of orders, optionally filtered by status.
    #[tracing::instrument(skip(self))]
    pub async fn list_orders(&self, cmd: ListOrders) -> Result<Page<Order>, DomainError> {
        let page = self.store.query(cmd.to_query()).await?;
        Ok(page.map(Order::from))
    }
}
