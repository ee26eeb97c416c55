use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::models::{Order, OrderFilter, OrderItem};
use super::errors::StoreError;

// ============================================================================
// Order Store - Repository for the Order Aggregate
// ============================================================================
//
// Owns ALL access to the `orders` and `items` tables and hides the two-table
// normalization from callers.
//
// Responsibilities:
// 1. Atomic create: order row + item rows commit together or not at all
// 2. Replace-on-update: scalar update + wholesale item replacement, in one
//    transaction
// 3. Filtered list: reconstruct each aggregate from its rows
//
// No locks are held here; serialization is delegated to PostgreSQL
// transaction isolation.
//
// ============================================================================

const INSERT_ORDER: &str =
    "INSERT INTO orders (id, status, total, currency_unit) VALUES ($1, $2, $3, $4)";

const INSERT_ITEM: &str =
    "INSERT INTO items (id, order_id, description, price, quantity) VALUES ($1, $2, $3, $4, $5)";

const UPDATE_ORDER: &str =
    "UPDATE orders SET status = $1, total = $2, currency_unit = $3 WHERE id = $4";

const DELETE_ITEMS: &str = "DELETE FROM items WHERE order_id = $1";

// Exactly two prepared variants; which one runs is decided by filter
// presence, never by concatenating SQL fragments.
const SELECT_ORDERS: &str = "SELECT id, status, total, currency_unit FROM orders";

const SELECT_ORDERS_BY_STATUS: &str =
    "SELECT id, status, total, currency_unit FROM orders WHERE status = $1";

const SELECT_ITEMS: &str =
    "SELECT id, description, price, quantity FROM items WHERE order_id = $1";

/// Pick the list query variant for a filter.
fn orders_query(filter: &OrderFilter) -> &'static str {
    match filter.status_filter() {
        Some(_) => SELECT_ORDERS_BY_STATUS,
        None => SELECT_ORDERS,
    }
}

#[derive(Clone)]
pub struct OrderStore {
    pool: PgPool,
}

impl OrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create both tables if they do not exist yet.
    ///
    /// The item -> order relationship is join-column equality only; no
    /// declared foreign key, no primary key on `items`.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS orders (
                id            TEXT PRIMARY KEY,
                status        TEXT NOT NULL,
                total         DOUBLE PRECISION NOT NULL,
                currency_unit TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS items (
                id            TEXT NOT NULL,
                order_id      TEXT NOT NULL,
                description   TEXT NOT NULL,
                price         DOUBLE PRECISION NOT NULL,
                quantity      INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Persist a new order and all of its items atomically.
    ///
    /// Any insert failure aborts the whole transaction; no rows become
    /// visible to subsequent reads.
    pub async fn create(&self, order: Order) -> Result<Order, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(INSERT_ORDER)
            .bind(&order.id)
            .bind(&order.status)
            .bind(order.total)
            .bind(&order.currency_unit)
            .execute(&mut *tx)
            .await?;

        for item in &order.items {
            sqlx::query(INSERT_ITEM)
                .bind(&item.id)
                .bind(&order.id)
                .bind(&item.description)
                .bind(item.price)
                .bind(item.quantity)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            order_id = %order.id,
            item_count = order.items.len(),
            "order created"
        );

        Ok(order)
    }

    /// Replace an existing order: update its scalar columns, then swap the
    /// entire item set (delete-all-then-insert), all in one transaction.
    ///
    /// Items are bound to `order_id` (the addressed order), not to any id
    /// carried inside `order`. Returns `NotFound` when no orders row matches.
    pub async fn replace(&self, order_id: &str, order: Order) -> Result<Order, StoreError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(UPDATE_ORDER)
            .bind(&order.status)
            .bind(order.total)
            .bind(&order.currency_unit)
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(StoreError::NotFound(order_id.to_string()));
        }

        sqlx::query(DELETE_ITEMS)
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        for item in &order.items {
            sqlx::query(INSERT_ITEM)
                .bind(&item.id)
                .bind(order_id)
                .bind(&item.description)
                .bind(item.price)
                .bind(item.quantity)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            order_id = %order_id,
            item_count = order.items.len(),
            "order replaced"
        );

        Ok(order)
    }

    /// List order aggregates matching the filter.
    ///
    /// Runs one query for the orders, then one per order for its items.
    /// Row order is the engine's natural scan order; callers must not rely
    /// on it. A decode failure on any row aborts the whole list.
    pub async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, StoreError> {
        let query = orders_query(filter);

        let rows = match filter.status_filter() {
            Some(status) => sqlx::query(query).bind(status).fetch_all(&self.pool).await?,
            None => sqlx::query(query).fetch_all(&self.pool).await?,
        };

        let mut orders = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut order = order_from_row(row)?;
            order.items = self.items_for_order(&order.id).await?;
            orders.push(order);
        }

        tracing::debug!(
            count = orders.len(),
            filtered = filter.status_filter().is_some(),
            "listed orders"
        );

        Ok(orders)
    }

    async fn items_for_order(&self, order_id: &str) -> Result<Vec<OrderItem>, StoreError> {
        let rows = sqlx::query(SELECT_ITEMS)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            items.push(item_from_row(row)?);
        }

        Ok(items)
    }
}

fn order_from_row(row: &PgRow) -> Result<Order, StoreError> {
    Ok(Order {
        id: row.try_get("id")?,
        status: row.try_get("status")?,
        total: row.try_get("total")?,
        currency_unit: row.try_get("currency_unit")?,
        items: Vec::new(),
    })
}

fn item_from_row(row: &PgRow) -> Result<OrderItem, StoreError> {
    Ok(OrderItem {
        id: row.try_get("id")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        quantity: row.try_get("quantity")?,
    })
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfiltered_list_uses_bare_variant() {
        assert_eq!(orders_query(&OrderFilter::default()), SELECT_ORDERS);
    }

    #[test]
    fn test_status_filter_selects_parameterized_variant() {
        let filter = OrderFilter::by_status("shipped");
        assert_eq!(orders_query(&filter), SELECT_ORDERS_BY_STATUS);
        assert!(orders_query(&filter).ends_with("WHERE status = $1"));
    }

    #[test]
    fn test_empty_status_behaves_as_unfiltered() {
        let filter = OrderFilter::by_status("");
        assert_eq!(orders_query(&filter), SELECT_ORDERS);
    }

    #[test]
    fn test_statements_are_parameterized() {
        // No statement interpolates values; every caller input is bound.
        for statement in [
            INSERT_ORDER,
            INSERT_ITEM,
            UPDATE_ORDER,
            DELETE_ITEMS,
            SELECT_ORDERS_BY_STATUS,
            SELECT_ITEMS,
        ] {
            assert!(statement.contains("$1"), "unbound statement: {statement}");
        }
    }

    // Database-backed behavior (atomic create, transactional replace,
    // aggregate reconstruction, filter exactness) is covered by
    // tests/store_integration.rs against a real PostgreSQL instance.
}
