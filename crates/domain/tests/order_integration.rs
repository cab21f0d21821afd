//! Integration tests for the order service.
//!
//! These tests verify the order lifecycle against the in-memory store,
//! including idempotent cancel and version-conflict handling.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use common::{OrderId, OrderStatus};
use domain::{
    CancelOrder, CreateOrder, DomainError, ListOrders, MAX_CANCEL_ATTEMPTS, OrderService,
    TotalAmount,
};
use order_store::{
    InMemoryOrderStore, NewOrder, OrderQuery, OrderRecord, OrderStore, OrderStoreError, Page,
    Result as StoreResult, UpdateOptions, Version,
};

/// Helper to create a test order service
fn create_service() -> OrderService<InMemoryOrderStore> {
    OrderService::new(InMemoryOrderStore::new())
}

fn create_cmd(cents: i64) -> CreateOrder {
    CreateOrder::new(TotalAmount::from_cents(cents).unwrap())
}

/// Store wrapper that lets another writer win the race on the first
/// `conflicts` versioned updates.
#[derive(Clone)]
struct RacingStore {
    inner: InMemoryOrderStore,
    conflicts: Arc<AtomicU32>,
    competing_status: OrderStatus,
}

impl RacingStore {
    fn new(conflicts: u32, competing_status: OrderStatus) -> Self {
        Self {
            inner: InMemoryOrderStore::new(),
            conflicts: Arc::new(AtomicU32::new(conflicts)),
            competing_status,
        }
    }
}

#[async_trait]
impl OrderStore for RacingStore {
    async fn insert(&self, order: NewOrder) -> StoreResult<OrderRecord> {
        self.inner.insert(order).await
    }

    async fn get(&self, id: OrderId) -> StoreResult<Option<OrderRecord>> {
        self.inner.get(id).await
    }

    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        options: UpdateOptions,
    ) -> StoreResult<OrderRecord> {
        let remaining = self.conflicts.load(Ordering::SeqCst);
        if remaining > 0 && options.expected_version.is_some() {
            self.conflicts.store(remaining - 1, Ordering::SeqCst);
            // Someone else writes first
            self.inner
                .update_status(id, self.competing_status, UpdateOptions::new())
                .await?;
        }
        self.inner.update_status(id, status, options).await
    }

    async fn query(&self, query: OrderQuery) -> StoreResult<Page<OrderRecord>> {
        self.inner.query(query).await
    }

    async fn count(&self, status: Option<OrderStatus>) -> StoreResult<u64> {
        self.inner.count(status).await
    }
}

mod order_lifecycle {
    use super::*;

    #[tokio::test]
    async fn create_cancel_and_read_back() {
        let service = create_service();

        let created = service.create_order(create_cmd(10000)).await.unwrap();
        assert_eq!(created.status(), OrderStatus::Created);
        assert_eq!(created.version(), Version::initial());
        assert_eq!(created.total_amount().to_string(), "100.00");

        let cancelled = service
            .cancel_order(CancelOrder::new(created.id()))
            .await
            .unwrap();
        assert_eq!(cancelled.status(), OrderStatus::Cancelled);

        // Read-after-write
        let loaded = service.get_order(created.id()).await.unwrap();
        assert_eq!(loaded.status(), OrderStatus::Cancelled);
        assert_eq!(loaded.version(), Version::new(1));
        assert_eq!(loaded.total_amount(), created.total_amount());
        assert!(loaded.updated_at() >= loaded.created_at());
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let service = create_service();

        match service.get_order(OrderId::new(9999)).await {
            Err(DomainError::NotFound { order_id }) => assert_eq!(order_id, OrderId::new(9999)),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn ids_increase_with_each_create() {
        let service = create_service();

        let first = service.create_order(create_cmd(100)).await.unwrap();
        let second = service.create_order(create_cmd(100)).await.unwrap();

        assert!(second.id() > first.id());
    }
}

mod cancel_concurrency {
    use super::*;

    #[tokio::test]
    async fn concurrent_cancels_all_succeed_with_a_single_write() {
        let service = Arc::new(create_service());
        let created = service.create_order(create_cmd(10000)).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..10 {
            let service = service.clone();
            let id = created.id();
            handles.push(tokio::spawn(async move {
                service.cancel_order(CancelOrder::new(id)).await
            }));
        }

        for handle in handles {
            let order = handle.await.unwrap().unwrap();
            assert_eq!(order.status(), OrderStatus::Cancelled);
        }

        let loaded = service.get_order(created.id()).await.unwrap();
        assert_eq!(loaded.version(), Version::new(1));
    }

    #[tokio::test]
    async fn conflict_with_a_competing_cancel_returns_the_cancelled_order() {
        let service = OrderService::new(RacingStore::new(1, OrderStatus::Cancelled));
        let created = service.create_order(create_cmd(10000)).await.unwrap();

        let order = service
            .cancel_order(CancelOrder::new(created.id()))
            .await
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Cancelled);
        // Only the competing write landed
        assert_eq!(order.version(), Version::new(1));
    }

    #[tokio::test]
    async fn conflict_is_retried_against_the_fresh_version() {
        // The competing writer leaves the order CREATED but bumps its version
        let service = OrderService::new(RacingStore::new(1, OrderStatus::Created));
        let created = service.create_order(create_cmd(10000)).await.unwrap();

        let order = service
            .cancel_order(CancelOrder::new(created.id()))
            .await
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Cancelled);
        assert_eq!(order.version(), Version::new(2));
    }

    #[tokio::test]
    async fn conflict_surfaces_after_attempts_run_out() {
        let service = OrderService::new(RacingStore::new(
            MAX_CANCEL_ATTEMPTS,
            OrderStatus::Created,
        ));
        let created = service.create_order(create_cmd(10000)).await.unwrap();

        let err = service
            .cancel_order(CancelOrder::new(created.id()))
            .await
            .unwrap_err();

        assert!(err.is_conflict());
        assert!(matches!(
            err,
            DomainError::Store(OrderStoreError::ConcurrencyConflict { .. })
        ));
    }
}

mod listing {
    use super::*;
    use order_store::{PageRequest, Sort, SortDirection, SortField};

    #[tokio::test]
    async fn default_listing_returns_first_twenty_by_id() {
        let service = create_service();
        for _ in 0..21 {
            service.create_order(create_cmd(1000)).await.unwrap();
        }

        let page = service.list_orders(ListOrders::new()).await.unwrap();

        assert_eq!(page.content.len(), 20);
        assert_eq!(page.size, 20);
        assert_eq!(page.number, 0);
        assert_eq!(page.total_elements, 21);
        assert!(page.content.windows(2).all(|w| w[0].id() < w[1].id()));
    }

    #[tokio::test]
    async fn status_filter_only_returns_matching_orders() {
        let service = create_service();
        let first = service.create_order(create_cmd(10000)).await.unwrap();
        let second = service.create_order(create_cmd(5000)).await.unwrap();
        service
            .cancel_order(CancelOrder::new(second.id()))
            .await
            .unwrap();

        let created = service
            .list_orders(ListOrders::new().with_status(Some(OrderStatus::Created)))
            .await
            .unwrap();
        assert_eq!(created.content.len(), 1);
        assert_eq!(created.content[0].id(), first.id());

        let cancelled = service
            .list_orders(ListOrders::new().with_status(Some(OrderStatus::Cancelled)))
            .await
            .unwrap();
        assert!(
            cancelled
                .content
                .iter()
                .all(|o| o.status() == OrderStatus::Cancelled)
        );
        assert_eq!(cancelled.content.len(), 1);
    }

    #[tokio::test]
    async fn custom_sort_and_page() {
        let service = create_service();
        for cents in [300, 100, 200] {
            service.create_order(create_cmd(cents)).await.unwrap();
        }

        let page = service
            .list_orders(
                ListOrders::new()
                    .sort(Sort::new(SortField::TotalAmount, SortDirection::Asc))
                    .page(PageRequest::new(0, 2)),
            )
            .await
            .unwrap();

        let amounts: Vec<String> = page
            .content
            .iter()
            .map(|o| o.total_amount().to_string())
            .collect();
        assert_eq!(amounts, vec!["1.00", "2.00"]);
        assert_eq!(page.total_pages(), 2);
    }
}
