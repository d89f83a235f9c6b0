//! Seeding helpers shared by the repository tests. Rows that a repository
//! under test does not own are inserted directly so each test exercises a
//! single write path.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use std::sync::Arc;

use crate::customers::UserDB;
use crate::db::{get_connection, DbPool};
use crate::orders::OrderDB;
use crate::products::ProductDB;
use crate::schema::{orders, products, users};

pub(crate) fn seed_user(pool: &Arc<DbPool>, user_id: &str, name: &str) {
    seed_user_with_role(pool, user_id, name, "customer");
}

pub(crate) fn seed_user_with_role(pool: &Arc<DbPool>, user_id: &str, name: &str, role: &str) {
    let mut conn = get_connection(pool).expect("Failed to get connection");
    diesel::insert_into(users::table)
        .values(&UserDB {
            id: user_id.to_string(),
            user_name: name.to_string(),
            email: format!("{}@example.com", user_id),
            role: role.to_string(),
        })
        .execute(&mut conn)
        .expect("Failed to seed user");
}

pub(crate) fn seed_product(pool: &Arc<DbPool>, product_id: &str) {
    let now = chrono::Utc::now().naive_utc();
    let mut conn = get_connection(pool).expect("Failed to get connection");
    diesel::insert_into(products::table)
        .values(&ProductDB {
            id: product_id.to_string(),
            name: format!("Product {}", product_id),
            sku: format!("SKU-{}", product_id),
            price: "9.99".to_string(),
            description: None,
            ai_generated: false,
            has_image: false,
            image_extension: None,
            enrich_attempts: 0,
            enrich_next_attempt_at: None,
            enrich_last_error: None,
            created_at: now,
            updated_at: now,
        })
        .execute(&mut conn)
        .expect("Failed to seed product");
}

pub(crate) fn seed_order(pool: &Arc<DbPool>, order_id: &str, customer: &str, date: &str) {
    let order_date = NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S")
        .expect("Failed to parse order date");
    let mut conn = get_connection(pool).expect("Failed to get connection");
    diesel::insert_into(orders::table)
        .values(&OrderDB {
            id: order_id.to_string(),
            order_date,
            province: "ON".to_string(),
            total: "113.00".to_string(),
            tax: "13.00".to_string(),
            tax_description: "HST".to_string(),
            customer_id: customer.to_string(),
        })
        .execute(&mut conn)
        .expect("Failed to seed order");
}

pub(crate) fn seed_order_item(
    pool: &Arc<DbPool>,
    item_id: &str,
    order: &str,
    product: &str,
    quantity: i32,
) {
    let now = chrono::Utc::now().naive_utc();
    let mut conn = get_connection(pool).expect("Failed to get connection");
    diesel::insert_into(crate::schema::order_items::table)
        .values(&crate::order_items::OrderItemDB {
            id: item_id.to_string(),
            unit_price: "19.99".to_string(),
            quantity,
            order_id: order.to_string(),
            product_id: product.to_string(),
            created_at: now,
            updated_at: now,
        })
        .execute(&mut conn)
        .expect("Failed to seed order item");
}
