use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgRow};

use crate::{
    NewOrder, OrderId, OrderQuery, OrderRecord, OrderStatus, OrderStoreError, Page, Result,
    Version,
    store::{OrderStore, UpdateOptions},
};

const ORDER_COLUMNS: &str = "id, version, status, total_amount, created_at, updated_at";

/// PostgreSQL-backed order store implementation.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a new PostgreSQL order store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_order(row: PgRow) -> Result<OrderRecord> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| OrderStoreError::InvalidRow(e.to_string()))?;

        Ok(OrderRecord {
            id: OrderId::new(row.try_get("id")?),
            version: Version::new(row.try_get("version")?),
            status,
            total_amount: row.try_get("total_amount")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    /// Opens a read-only transaction with a single snapshot, so a page and
    /// its total count agree with each other.
    async fn begin_read_only(&self) -> Result<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    async fn count_in(
        tx: &mut Transaction<'static, Postgres>,
        status: Option<OrderStatus>,
    ) -> Result<u64> {
        let count: i64 = match status {
            Some(status) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE status = $1")
                    .bind(status.as_str())
                    .fetch_one(&mut **tx)
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM orders")
                    .fetch_one(&mut **tx)
                    .await?
            }
        };
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn insert(&self, order: NewOrder) -> Result<OrderRecord> {
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO orders (version, status, total_amount, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(Version::initial().as_i64())
        .bind(order.status.as_str())
        .bind(order.total_amount)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        let record = Self::row_to_order(row)?;
        tx.commit().await?;

        tracing::debug!(order_id = %record.id, "order row inserted");
        Ok(record)
    }

    async fn get(&self, id: OrderId) -> Result<Option<OrderRecord>> {
        let row: Option<PgRow> =
            sqlx::query(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await?;

        row.map(Self::row_to_order).transpose()
    }

    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        options: UpdateOptions,
    ) -> Result<OrderRecord> {
        // Start a transaction; dropping it on any error path rolls back
        let mut tx = self.pool.begin().await?;

        // Version check and write in one statement
        let mut sql = String::from(
            r#"
            UPDATE orders
            SET status = $1, version = version + 1, updated_at = GREATEST(NOW(), created_at)
            WHERE id = $2
            "#,
        );
        if options.expected_version.is_some() {
            sql.push_str(" AND version = $3");
        }
        sql.push_str(&format!(" RETURNING {ORDER_COLUMNS}"));

        let mut update = sqlx::query(&sql).bind(status.as_str()).bind(id.as_i64());
        if let Some(expected) = options.expected_version {
            update = update.bind(expected.as_i64());
        }

        let Some(row) = update.fetch_optional(&mut *tx).await? else {
            let actual: Option<i64> =
                sqlx::query_scalar("SELECT version FROM orders WHERE id = $1")
                    .bind(id.as_i64())
                    .fetch_optional(&mut *tx)
                    .await?;

            return Err(match (actual, options.expected_version) {
                (Some(actual), Some(expected)) => OrderStoreError::ConcurrencyConflict {
                    order_id: id,
                    expected,
                    actual: Version::new(actual),
                },
                _ => OrderStoreError::NotFound(id),
            });
        };

        let record = Self::row_to_order(row)?;
        tx.commit().await?;
        Ok(record)
    }

    async fn query(&self, query: OrderQuery) -> Result<Page<OrderRecord>> {
        let started = Instant::now();
        let mut tx = self.begin_read_only().await?;

        let mut sql = format!("SELECT {ORDER_COLUMNS} FROM orders");
        let mut param_count = 0;

        if query.status.is_some() {
            param_count += 1;
            sql.push_str(&format!(" WHERE status = ${param_count}"));
        }

        sql.push_str(&format!(" ORDER BY {}", query.sort.order_by_sql()));

        param_count += 1;
        sql.push_str(&format!(" LIMIT ${param_count}"));
        param_count += 1;
        sql.push_str(&format!(" OFFSET ${param_count}"));

        let mut sqlx_query = sqlx::query(&sql);
        if let Some(status) = query.status {
            sqlx_query = sqlx_query.bind(status.as_str());
        }
        sqlx_query = sqlx_query
            .bind(i64::try_from(query.page.size()).unwrap_or(i64::MAX))
            .bind(i64::try_from(query.page.offset()).unwrap_or(i64::MAX));

        let rows = sqlx_query.fetch_all(&mut *tx).await?;
        let content = rows
            .into_iter()
            .map(Self::row_to_order)
            .collect::<Result<Vec<_>>>()?;
        let total = Self::count_in(&mut tx, query.status).await?;
        tx.commit().await?;

        metrics::histogram!("order_store_query_seconds").record(started.elapsed().as_secs_f64());
        Ok(Page::new(content, query.page, total))
    }

    async fn count(&self, status: Option<OrderStatus>) -> Result<u64> {
        let mut tx = self.begin_read_only().await?;
        let total = Self::count_in(&mut tx, status).await?;
        tx.commit().await?;
        Ok(total)
    }
}
