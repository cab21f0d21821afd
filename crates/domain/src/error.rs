//! Domain error types.

use common::OrderId;
use order_store::OrderStoreError;
use thiserror::Error;

use crate::order::OrderError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in the order store.
    #[error("Order store error: {0}")]
    Store(#[from] OrderStoreError),

    /// An order rule was violated.
    #[error("Order error: {0}")]
    Order(OrderError),

    /// No order exists for the id.
    #[error("Order not found: {order_id}")]
    NotFound { order_id: OrderId },
}

impl DomainError {
    /// Returns true if this error is a lost optimistic-concurrency race.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            DomainError::Store(OrderStoreError::ConcurrencyConflict { .. })
        )
    }
}
