use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    NewOrder, OrderId, OrderQuery, OrderRecord, OrderStatus, OrderStoreError, Page, Result, Sort,
    SortDirection, SortField, Version,
    store::{OrderStore, UpdateOptions},
};

/// In-memory order store implementation for testing and local runs.
///
/// This implementation keeps all rows in memory and provides
/// the same interface as the PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<BTreeMap<OrderId, OrderRecord>>>,
    sequence: Arc<AtomicI64>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of orders stored.
    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Returns true if no orders are stored.
    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }

    /// Removes all orders. The id sequence keeps counting.
    pub async fn clear(&self) {
        self.orders.write().await.clear();
    }

    fn compare(sort: Sort, a: &OrderRecord, b: &OrderRecord) -> Ordering {
        let primary = match sort.field {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Status => a.status.as_str().cmp(b.status.as_str()),
            SortField::TotalAmount => a.total_amount.cmp(&b.total_amount),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        };
        let primary = match sort.direction {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };
        primary.then(a.id.cmp(&b.id))
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: NewOrder) -> Result<OrderRecord> {
        let mut orders = self.orders.write().await;

        let id = OrderId::new(self.sequence.fetch_add(1, AtomicOrdering::SeqCst) + 1);
        let now = Utc::now();
        let record = OrderRecord {
            id,
            version: Version::initial(),
            status: order.status,
            total_amount: order.total_amount,
            created_at: now,
            updated_at: now,
        };
        orders.insert(id, record.clone());

        Ok(record)
    }

    async fn get(&self, id: OrderId) -> Result<Option<OrderRecord>> {
        let orders = self.orders.read().await;
        Ok(orders.get(&id).cloned())
    }

    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        options: UpdateOptions,
    ) -> Result<OrderRecord> {
        let mut orders = self.orders.write().await;
        let record = orders.get_mut(&id).ok_or(OrderStoreError::NotFound(id))?;

        // Check expected version if specified
        if let Some(expected) = options.expected_version
            && record.version != expected
        {
            return Err(OrderStoreError::ConcurrencyConflict {
                order_id: id,
                expected,
                actual: record.version,
            });
        }

        record.status = status;
        record.version = record.version.next();
        record.updated_at = Utc::now().max(record.created_at);

        Ok(record.clone())
    }

    async fn query(&self, query: OrderQuery) -> Result<Page<OrderRecord>> {
        let orders = self.orders.read().await;
        let mut matching: Vec<_> = orders
            .values()
            .filter(|o| query.status.is_none_or(|status| o.status == status))
            .cloned()
            .collect();
        drop(orders);

        matching.sort_by(|a, b| Self::compare(query.sort, a, b));

        let total = matching.len() as u64;
        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(query.page.size()).unwrap_or(usize::MAX);
        let content: Vec<_> = matching.into_iter().skip(offset).take(size).collect();

        Ok(Page::new(content, query.page, total))
    }

    async fn count(&self, status: Option<OrderStatus>) -> Result<u64> {
        let orders = self.orders.read().await;
        let count = orders
            .values()
            .filter(|o| status.is_none_or(|s| o.status == s))
            .count();
        Ok(count as u64)
    }
}
