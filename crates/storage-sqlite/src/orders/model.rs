//! Database model for orders.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use storefront_core::errors::Error;
use storefront_core::orders::{Order, Province};

use crate::utils::parse_decimal_tolerant;

/// Database model for orders.
///
/// Rows are written by checkout, which lives upstream; this crate only
/// reads them. The Insertable derive stays because tests seed orders
/// directly.
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderDB {
    pub id: String,
    pub order_date: NaiveDateTime,
    pub province: String,
    pub total: String,
    pub tax: String,
    pub tax_description: String,
    pub customer_id: String,
}

impl TryFrom<OrderDB> for Order {
    type Error = Error;

    // The province column has no safe fallback, so a bad code fails the
    // read instead of being papered over.
    fn try_from(db: OrderDB) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            order_date: db.order_date,
            province: db.province.parse::<Province>()?,
            total: parse_decimal_tolerant(&db.total, "total"),
            tax: parse_decimal_tolerant(&db.tax, "tax"),
            tax_description: db.tax_description,
            customer_id: db.customer_id,
        })
    }
}
