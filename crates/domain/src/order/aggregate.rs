//! Order entity.

use chrono::{DateTime, Utc};
use common::{OrderId, OrderStatus};
use order_store::{OrderRecord, Version};
use rust_decimal::Decimal;

use super::OrderError;

/// Result of evaluating a cancel request against an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The order moves from `CREATED` to `CANCELLED`.
    Cancelled,

    /// The order is already cancelled; nothing to write.
    AlreadyCancelled,
}

/// An order as seen by the domain.
///
/// Orders are only created through the service and only change status
/// through [`Order::cancel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    version: Version,
    status: OrderStatus,
    total_amount: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Current version for optimistic concurrency. Internal only.
    pub fn version(&self) -> Version {
        self.version
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == OrderStatus::Cancelled
    }

    /// Decides what a cancel request does to this order.
    pub fn cancel(&self) -> Result<CancelOutcome, OrderError> {
        if !self.status.can_cancel() {
            return Err(OrderError::InvalidStateTransition {
                current_status: self.status,
                action: "cancel",
            });
        }

        if self.is_cancelled() {
            Ok(CancelOutcome::AlreadyCancelled)
        } else {
            Ok(CancelOutcome::Cancelled)
        }
    }
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        Self {
            id: record.id,
            version: record.version,
            status: record.status,
            total_amount: record.total_amount,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
