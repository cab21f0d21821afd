use async_trait::async_trait;

use crate::{
    NewOrder, OrderId, OrderQuery, OrderRecord, OrderStatus, OrderStoreError, Page, Result,
    Version,
};

/// Options for updating an order row.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// Expected version of the row for optimistic concurrency control.
    /// If None, no version check is performed (use with caution).
    pub expected_version: Option<Version>,
}

impl UpdateOptions {
    /// Creates options with no version check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options expecting the row to be at a specific version.
    pub fn expect_version(version: Version) -> Self {
        Self {
            expected_version: Some(version),
        }
    }
}

/// Core trait for order store implementations.
///
/// All implementations must be thread-safe (Send + Sync). Each method is
/// atomic on its own; callers coordinate read-modify-write cycles through
/// the version check on [`OrderStore::update_status`].
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts a new order.
    ///
    /// The store assigns the id, sets the version to 0 and stamps both
    /// timestamps with the same instant.
    async fn insert(&self, order: NewOrder) -> Result<OrderRecord>;

    /// Looks up an order by id.
    async fn get(&self, id: OrderId) -> Result<Option<OrderRecord>>;

    /// Sets the status of an order, bumping its version and `updated_at`.
    ///
    /// If `options.expected_version` is set, the update fails with
    /// `ConcurrencyConflict` when the stored version differs. Fails with
    /// `NotFound` when no row exists for `id`.
    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        options: UpdateOptions,
    ) -> Result<OrderRecord>;

    /// Runs a filtered, sorted and paginated scan.
    async fn query(&self, query: OrderQuery) -> Result<Page<OrderRecord>>;

    /// Counts orders, optionally only those in the given status.
    async fn count(&self, status: Option<OrderStatus>) -> Result<u64>;
}

/// Extension trait providing convenience methods for order stores.
#[async_trait]
pub trait OrderStoreExt: OrderStore {
    /// Checks if an order exists.
    async fn exists(&self, id: OrderId) -> Result<bool> {
        Ok(self.get(id).await?.is_some())
    }

    /// Looks up an order, failing with `NotFound` if it doesn't exist.
    async fn get_required(&self, id: OrderId) -> Result<OrderRecord> {
        self.get(id).await?.ok_or(OrderStoreError::NotFound(id))
    }
}

// Blanket implementation for all OrderStore implementations
impl<T: OrderStore + ?Sized> OrderStoreExt for T {}
