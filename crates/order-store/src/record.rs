use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{OrderId, OrderStatus};

/// Version number for an order row, used for optimistic concurrency control.
///
/// Rows are inserted at version 0 and every successful update increments
/// the version by exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version(i64);

impl Version {
    /// Creates a new version from a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the version (0) of a freshly inserted order.
    pub fn initial() -> Self {
        Self(0)
    }

    /// Returns the next version.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw version value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Version {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Version> for i64 {
    fn from(version: Version) -> Self {
        version.0
    }
}

/// An order as stored, including the store-managed columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    /// Store-assigned identifier.
    pub id: OrderId,

    /// Optimistic concurrency counter.
    pub version: Version,

    /// Current lifecycle status.
    pub status: OrderStatus,

    /// Order total with scale 2.
    pub total_amount: Decimal,

    /// Set once on insert.
    pub created_at: DateTime<Utc>,

    /// Refreshed on every update; never earlier than `created_at`.
    pub updated_at: DateTime<Utc>,
}

/// The caller-supplied part of an order row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub status: OrderStatus,
    pub total_amount: Decimal,
}

impl NewOrder {
    /// Creates a new order row in the `CREATED` status.
    pub fn created(total_amount: Decimal) -> Self {
        Self {
            status: OrderStatus::Created,
            total_amount,
        }
    }
}
