//! Database model for products.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use storefront_core::products::{NewProduct, Product, ProductUpdate};

use crate::utils::parse_decimal_tolerant;

/// Database model for products.
///
/// Money is stored as TEXT to keep decimal values exact. `treat_none_as_null`
/// makes full-row updates clear nullable columns instead of skipping them.
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
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct ProductDB {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub price: String,
    pub description: Option<String>,
    pub ai_generated: bool,
    pub has_image: bool,
    pub image_extension: Option<String>,
    pub enrich_attempts: i32,
    pub enrich_next_attempt_at: Option<NaiveDateTime>,
    pub enrich_last_error: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<ProductDB> for Product {
    fn from(db: ProductDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            sku: db.sku,
            price: parse_decimal_tolerant(&db.price, "price"),
            description: db.description,
            ai_generated: db.ai_generated,
            has_image: db.has_image,
            image_extension: db.image_extension,
            enrich_attempts: db.enrich_attempts,
            enrich_next_attempt_at: db.enrich_next_attempt_at,
            enrich_last_error: db.enrich_last_error,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewProduct> for ProductDB {
    fn from(domain: NewProduct) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name,
            sku: domain.sku,
            price: domain.price.to_string(),
            description: domain.description,
            ai_generated: false,
            has_image: false,
            image_extension: None,
            enrich_attempts: 0,
            enrich_next_attempt_at: None,
            enrich_last_error: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<ProductUpdate> for ProductDB {
    fn from(domain: ProductUpdate) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name,
            sku: domain.sku,
            price: domain.price.to_string(),
            description: domain.description,
            ai_generated: false,                  // This will be filled from existing record
            has_image: false,                     // This will be filled from existing record
            image_extension: None,                // This will be filled from existing record
            enrich_attempts: 0,                   // This will be filled from existing record
            enrich_next_attempt_at: None,         // This will be filled from existing record
            enrich_last_error: None,              // This will be filled from existing record
            created_at: NaiveDateTime::default(), // This will be filled from existing record
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
