use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, Result};
use crate::schema::{order_items, orders, products, users};
use crate::utils::parse_decimal_tolerant;

use super::model::OrderItemDB;
use storefront_core::order_items::{
    NewOrderItem, OrderItem, OrderItemDetails, OrderItemRepositoryTrait, OrderItemUpdate,
};
use storefront_core::orders::ORDER_DATE_FORMAT;

/// A detail row as the join produces it: the item itself plus the product
/// sku, the order date, and the owning customer's id and name.
type DetailsRow = (OrderItemDB, String, NaiveDateTime, String, String);

fn to_details(row: DetailsRow) -> OrderItemDetails {
    let (item, item_sku, date, owner_id, owner_name) = row;
    OrderItemDetails {
        id: item.id,
        unit_price: parse_decimal_tolerant(&item.unit_price, "unit_price"),
        quantity: item.quantity,
        order_id: item.order_id,
        product_id: item.product_id,
        product_sku: item_sku,
        order_date: date.format(ORDER_DATE_FORMAT).to_string(),
        customer_id: owner_id,
        customer_name: owner_name,
    }
}

/// Repository for managing order items in the database.
pub struct OrderItemRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl OrderItemRepository {
    /// Creates a new OrderItemRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl OrderItemRepositoryTrait for OrderItemRepository {
    fn get_by_id(&self, order_item_id: &str) -> Result<Option<OrderItem>> {
        let mut conn = get_connection(&self.pool)?;

        let row = order_items::table
            .select(OrderItemDB::as_select())
            .find(order_item_id)
            .first::<OrderItemDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(row.map(OrderItem::from))
    }

    fn get_details(&self, order_item_id: &str) -> Result<Option<OrderItemDetails>> {
        let mut conn = get_connection(&self.pool)?;

        let row = order_items::table
            .inner_join(orders::table.inner_join(users::table))
            .inner_join(products::table)
            .filter(order_items::id.eq(order_item_id))
            .select((
                OrderItemDB::as_select(),
                products::sku,
                orders::order_date,
                orders::customer_id,
                users::user_name,
            ))
            .first::<DetailsRow>(&mut conn)
            .optional()
            .into_core()?;

        Ok(row.map(to_details))
    }

    fn list_details(&self) -> Result<Vec<OrderItemDetails>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = order_items::table
            .inner_join(orders::table.inner_join(users::table))
            .inner_join(products::table)
            .select((
                OrderItemDB::as_select(),
                products::sku,
                orders::order_date,
                orders::customer_id,
                users::user_name,
            ))
            .order(order_items::id.asc())
            .load::<DetailsRow>(&mut conn)
            .into_core()?;

        Ok(rows.into_iter().map(to_details).collect())
    }

    fn list_details_for_order(&self, order_id: &str) -> Result<Vec<OrderItemDetails>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = order_items::table
            .inner_join(orders::table.inner_join(users::table))
            .inner_join(products::table)
            .filter(order_items::order_id.eq(order_id))
            .select((
                OrderItemDB::as_select(),
                products::sku,
                orders::order_date,
                orders::customer_id,
                users::user_name,
            ))
            .order(order_items::id.asc())
            .load::<DetailsRow>(&mut conn)
            .into_core()?;

        Ok(rows.into_iter().map(to_details).collect())
    }

    fn list_details_for_product(&self, product_id: &str) -> Result<Vec<OrderItemDetails>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = order_items::table
            .inner_join(orders::table.inner_join(users::table))
            .inner_join(products::table)
            .filter(order_items::product_id.eq(product_id))
            .select((
                OrderItemDB::as_select(),
                products::sku,
                orders::order_date,
                orders::customer_id,
                users::user_name,
            ))
            .order(order_items::id.asc())
            .load::<DetailsRow>(&mut conn)
            .into_core()?;

        Ok(rows.into_iter().map(to_details).collect())
    }

    async fn create(&self, new_order_item: NewOrderItem) -> Result<OrderItem> {
        let mut item_db: OrderItemDB = new_order_item.into();
        if item_db.id.is_empty() {
            item_db.id = uuid::Uuid::new_v4().to_string();
        }

        self.writer
            .exec(move |conn| {
                // Foreign keys are enforced here as well; a dangling
                // reference rolls the transaction back.
                diesel::insert_into(order_items::table)
                    .values(&item_db)
                    .execute(conn)
                    .into_core()?;

                Ok(item_db.into())
            })
            .await
    }

    async fn update(&self, item_update: OrderItemUpdate) -> Result<OrderItem> {
        self.writer
            .exec(move |conn| {
                let mut item_db: OrderItemDB = item_update.into();

                let existing = order_items::table
                    .select(OrderItemDB::as_select())
                    .find(&item_db.id)
                    .first::<OrderItemDB>(conn)
                    .into_core()?;

                item_db.created_at = existing.created_at;
                item_db.updated_at = chrono::Utc::now().naive_utc();

                diesel::update(order_items::table.find(&item_db.id))
                    .set(&item_db)
                    .execute(conn)
                    .into_core()?;

                Ok(item_db.into())
            })
            .await
    }

    async fn delete(&self, order_item_id: &str) -> Result<usize> {
        let target = order_item_id.to_string();

        self.writer
            .exec(move |conn| {
                diesel::delete(order_items::table.filter(order_items::id.eq(&target)))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
