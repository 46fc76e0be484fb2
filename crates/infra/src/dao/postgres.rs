//! Postgres-backed `order_table` store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | Database (any code) | `Database` (code included in message) |
//! | ColumnDecode / Decode | `Conversion` |
//! | PoolClosed | `Database` |
//! | Other | `Database` |
//!
//! ## Runtime
//!
//! `OrderTableDao` is synchronous. Calls block the current worker via
//! `tokio::task::block_in_place`, so they must run on a multi-threaded tokio runtime;
//! on a current-thread runtime they fail with `StoreError::Runtime`.

use std::future::Future;
use std::sync::Arc;

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tokio::runtime::RuntimeFlavor;
use tracing::{Span, info, instrument};

use kitchenpos_core::{Entity, OrderTableId, TableGroupId};
use kitchenpos_tables::OrderTable;

use super::order_table::OrderTableDao;
use crate::error::StoreError;

/// Versioned schema for `order_table`, `orders` and `order_line_item`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Debug, FromRow)]
struct OrderTableRow {
    id: i64,
    table_group_id: Option<i64>,
    number_of_guests: i32,
    empty: bool,
}

impl OrderTableRow {
    fn into_table(self, operation: &'static str) -> Result<OrderTable, StoreError> {
        let number_of_guests =
            u32::try_from(self.number_of_guests).map_err(|_| StoreError::Conversion {
                operation,
                message: format!("negative number_of_guests {}", self.number_of_guests),
            })?;

        Ok(OrderTable::rehydrate(
            OrderTableId::new(self.id),
            self.table_group_id.map(TableGroupId::new),
            number_of_guests,
            self.empty,
        ))
    }
}

fn guests_column(table: &OrderTable, operation: &'static str) -> Result<i32, StoreError> {
    i32::try_from(table.number_of_guests()).map_err(|_| StoreError::Conversion {
        operation,
        message: format!("number_of_guests {} exceeds INT", table.number_of_guests()),
    })
}

/// Postgres-backed `order_table` store.
#[derive(Debug, Clone)]
pub struct PostgresOrderTableDao {
    pool: Arc<PgPool>,
}

impl PostgresOrderTableDao {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Apply pending migrations, recording them in `_sqlx_migrations`.
    #[instrument(skip(self), err)]
    pub async fn migrate(&self) -> Result<(), StoreError> {
        info!("Running database migrations...");
        MIGRATOR
            .run(&*self.pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;
        info!("Migrations completed successfully.");
        Ok(())
    }

    #[instrument(skip(self, table), fields(order_table_id), err)]
    pub async fn insert(&self, table: &OrderTable) -> Result<OrderTable, StoreError> {
        let row = sqlx::query_as::<_, OrderTableRow>(
            r#"
            INSERT INTO order_table (table_group_id, number_of_guests, empty)
            VALUES ($1, $2, $3)
            RETURNING id, table_group_id, number_of_guests, empty
            "#,
        )
        .bind(table.table_group_id().map(i64::from))
        .bind(guests_column(table, "insert_order_table")?)
        .bind(table.is_empty())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_order_table", e))?;

        Span::current().record("order_table_id", row.id);
        row.into_table("insert_order_table")
    }

    #[instrument(skip(self, table), fields(order_table_id = ?table.id()), err)]
    pub async fn update(&self, table: &OrderTable) -> Result<(), StoreError> {
        let Some(id) = table.id() else {
            return Err(StoreError::MissingIdentity);
        };

        sqlx::query(
            r#"
            UPDATE order_table
            SET table_group_id = $1, number_of_guests = $2, empty = $3
            WHERE id = $4
            "#,
        )
        .bind(table.table_group_id().map(i64::from))
        .bind(guests_column(table, "update_order_table")?)
        .bind(table.is_empty())
        .bind(id.get())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_order_table", e))?;

        Ok(())
    }

    #[instrument(skip(self), fields(order_table_id = %id), err)]
    pub async fn select(&self, id: OrderTableId) -> Result<Option<OrderTable>, StoreError> {
        let row = sqlx::query_as::<_, OrderTableRow>(
            r#"
            SELECT id, table_group_id, number_of_guests, empty
            FROM order_table
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("select_order_table", e))?;

        row.map(|r| r.into_table("select_order_table")).transpose()
    }

    #[instrument(skip(self), err)]
    pub async fn select_all(&self) -> Result<Vec<OrderTable>, StoreError> {
        let rows = sqlx::query_as::<_, OrderTableRow>(
            r#"
            SELECT id, table_group_id, number_of_guests, empty
            FROM order_table
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("select_all_order_tables", e))?;

        rows.into_iter()
            .map(|r| r.into_table("select_all_order_tables"))
            .collect()
    }

    #[instrument(skip(self, ids), fields(requested = ids.len()), err)]
    pub async fn select_by_ids(
        &self,
        ids: &[OrderTableId],
    ) -> Result<Vec<OrderTable>, StoreError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let raw_ids: Vec<i64> = ids.iter().map(|id| id.get()).collect();

        let rows = sqlx::query_as::<_, OrderTableRow>(
            r#"
            SELECT id, table_group_id, number_of_guests, empty
            FROM order_table
            WHERE id = ANY($1)
            ORDER BY id ASC
            "#,
        )
        .bind(raw_ids)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("select_order_tables_by_ids", e))?;

        rows.into_iter()
            .map(|r| r.into_table("select_order_tables_by_ids"))
            .collect()
    }

    #[instrument(skip(self), fields(table_group_id = %table_group_id), err)]
    pub async fn select_by_table_group_id(
        &self,
        table_group_id: TableGroupId,
    ) -> Result<Vec<OrderTable>, StoreError> {
        let rows = sqlx::query_as::<_, OrderTableRow>(
            r#"
            SELECT id, table_group_id, number_of_guests, empty
            FROM order_table
            WHERE table_group_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(table_group_id.get())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("select_order_tables_by_group", e))?;

        rows.into_iter()
            .map(|r| r.into_table("select_order_tables_by_group"))
            .collect()
    }

    fn run_blocking<F, T>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|e| StoreError::Runtime(format!("no tokio runtime: {e}")))?;
        if handle.runtime_flavor() == RuntimeFlavor::CurrentThread {
            return Err(StoreError::Runtime(
                "PostgresOrderTableDao needs a multi-threaded tokio runtime".to_string(),
            ));
        }
        tokio::task::block_in_place(|| handle.block_on(fut))
    }
}

impl OrderTableDao for PostgresOrderTableDao {
    fn save(&self, table: OrderTable) -> Result<OrderTable, StoreError> {
        if table.is_new() {
            return self.run_blocking(self.insert(&table));
        }
        self.run_blocking(self.update(&table))?;
        Ok(table)
    }

    fn find_by_id(&self, id: OrderTableId) -> Result<Option<OrderTable>, StoreError> {
        self.run_blocking(self.select(id))
    }

    fn find_all(&self) -> Result<Vec<OrderTable>, StoreError> {
        self.run_blocking(self.select_all())
    }

    fn find_all_by_id_in(&self, ids: &[OrderTableId]) -> Result<Vec<OrderTable>, StoreError> {
        self.run_blocking(self.select_by_ids(ids))
    }

    fn find_all_by_table_group_id(
        &self,
        table_group_id: TableGroupId,
    ) -> Result<Vec<OrderTable>, StoreError> {
        self.run_blocking(self.select_by_table_group_id(table_group_id))
    }
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let message = match db_err.code() {
                Some(code) => format!("[{}] {}", code, db_err.message()),
                None => db_err.message().to_string(),
            };
            StoreError::Database { operation, message }
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => StoreError::Conversion {
            operation,
            message: err.to_string(),
        },
        sqlx::Error::PoolClosed => StoreError::Database {
            operation,
            message: "connection pool closed".to_string(),
        },
        other => StoreError::Database {
            operation,
            message: other.to_string(),
        },
    }
}
