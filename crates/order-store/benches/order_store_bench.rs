use criterion::{Criterion, criterion_group, criterion_main};
use order_store::{
    InMemoryOrderStore, NewOrder, OrderQuery, OrderStatus, OrderStore, PageRequest, Sort,
    SortDirection, SortField, UpdateOptions,
};
use rust_decimal::Decimal;

fn seeded_store(rt: &tokio::runtime::Runtime, count: i64) -> InMemoryOrderStore {
    rt.block_on(async {
        let store = InMemoryOrderStore::new();
        for i in 0..count {
            let record = store
                .insert(NewOrder::created(Decimal::new(100 + i, 2)))
                .await
                .unwrap();
            if i % 3 == 0 {
                store
                    .update_status(record.id, OrderStatus::Cancelled, UpdateOptions::new())
                    .await
                    .unwrap();
            }
        }
        store
    })
}

fn bench_insert(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("order_store/insert", |b| {
        let store = InMemoryOrderStore::new();
        b.iter(|| {
            rt.block_on(async {
                store
                    .insert(NewOrder::created(Decimal::new(10000, 2)))
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_query_default_page(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = seeded_store(&rt, 1_000);

    c.bench_function("order_store/query_default_page_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                store.query(OrderQuery::new()).await.unwrap();
            });
        });
    });
}

fn bench_query_filtered_sorted(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = seeded_store(&rt, 1_000);
    let query = OrderQuery::new()
        .status(OrderStatus::Cancelled)
        .sort(Sort::new(SortField::TotalAmount, SortDirection::Desc))
        .page(PageRequest::new(3, 50));

    c.bench_function("order_store/query_filtered_sorted_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                store.query(query).await.unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_insert,
    bench_query_default_page,
    bench_query_filtered_sorted
);
criterion_main!(benches);
