use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::{IntoCore, Result, StorageError};
use crate::schema::orders;

use super::model::OrderDB;
use storefront_core::orders::{Order, OrderRepositoryTrait, OrderSummary};

/// Read-only repository over orders. Checkout owns the write path.
pub struct OrderRepository {
    pool: Arc<DbPool>,
}

impl OrderRepository {
    /// Creates a new OrderRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl OrderRepositoryTrait for OrderRepository {
    fn get_by_id(&self, order_id: &str) -> Result<Option<Order>> {
        let mut conn = get_connection(&self.pool)?;

        let row = orders::table
            .select(OrderDB::as_select())
            .find(order_id)
            .first::<OrderDB>(&mut conn)
            .optional()
            .into_core()?;

        row.map(Order::try_from).transpose()
    }

    fn exists(&self, order_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;

        let count: i64 = orders::table
            .filter(orders::id.eq(order_id))
            .count()
            .get_result(&mut conn)
            .into_core()?;

        Ok(count > 0)
    }

    fn owner_of(&self, order_id: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;

        orders::table
            .find(order_id)
            .select(orders::customer_id)
            .first::<String>(&mut conn)
            .optional()
            .into_core()
    }

    fn list_summaries(&self, customer: Option<&str>) -> Result<Vec<OrderSummary>> {
        let mut conn = get_connection(&self.pool)?;

        #[derive(QueryableByName, Debug)]
        struct OrderSummaryRow {
            #[diesel(sql_type = diesel::sql_types::Text)]
            id: String,
            #[diesel(sql_type = diesel::sql_types::Text)]
            order_date: String,
            #[diesel(sql_type = diesel::sql_types::Text)]
            customer_id: String,
            #[diesel(sql_type = diesel::sql_types::Text)]
            customer_name: String,
            #[diesel(sql_type = diesel::sql_types::BigInt)]
            item_count: i64,
        }

        // The optional customer filter is part of the statement, so a
        // narrowed listing never pulls foreign rows out of the database.
        let rows: Vec<OrderSummaryRow> = diesel::sql_query(
            r#"
            SELECT o.id AS id,
                   strftime('%Y-%m-%d', o.order_date) AS order_date,
                   o.customer_id AS customer_id,
                   u.user_name AS customer_name,
                   COUNT(oi.id) AS item_count
            FROM orders o
            INNER JOIN users u ON u.id = o.customer_id
            LEFT JOIN order_items oi ON oi.order_id = o.id
            WHERE (? IS NULL OR o.customer_id = ?)
            GROUP BY o.id, o.order_date, o.customer_id, u.user_name
            ORDER BY o.id ASC
            "#,
        )
        .bind::<diesel::sql_types::Nullable<diesel::sql_types::Text>, _>(customer)
        .bind::<diesel::sql_types::Nullable<diesel::sql_types::Text>, _>(customer)
        .load(&mut conn)
        .map_err(StorageError::from)?;

        Ok(rows
            .into_iter()
            .map(|row| OrderSummary {
                id: row.id,
                order_date: row.order_date,
                customer_id: row.customer_id,
                customer_name: row.customer_name,
                item_count: row.item_count,
            })
            .collect())
    }
}
