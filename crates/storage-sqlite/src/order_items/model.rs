//! Database model for order items.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use storefront_core::order_items::{NewOrderItem, OrderItem, OrderItemUpdate};

use crate::utils::parse_decimal_tolerant;

/// Database model for order items
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::order_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderItemDB {
    pub id: String,
    pub unit_price: String,
    pub quantity: i32,
    pub order_id: String,
    pub product_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<OrderItemDB> for OrderItem {
    fn from(db: OrderItemDB) -> Self {
        Self {
            id: db.id,
            unit_price: parse_decimal_tolerant(&db.unit_price, "unit_price"),
            quantity: db.quantity,
            order_id: db.order_id,
            product_id: db.product_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewOrderItem> for OrderItemDB {
    fn from(domain: NewOrderItem) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            unit_price: domain.unit_price.to_string(),
            quantity: domain.quantity,
            order_id: domain.order_id,
            product_id: domain.product_id,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<OrderItemUpdate> for OrderItemDB {
    fn from(domain: OrderItemUpdate) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            unit_price: domain.unit_price.to_string(),
            quantity: domain.quantity,
            order_id: domain.order_id,
            product_id: domain.product_id,
            created_at: NaiveDateTime::default(), // This will be filled from existing record
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
