use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, Result};
use crate::schema::categories_products;
use crate::schema::products;
use crate::schema::products::dsl::*;

use super::model::ProductDB;
use storefront_core::products::{
    ImageClaim, NewProduct, Product, ProductRepositoryTrait, ProductUpdate,
};

/// Repository for managing catalog products in the database.
pub struct ProductRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ProductRepository {
    /// Creates a new ProductRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ProductRepositoryTrait for ProductRepository {
    fn get_by_id(&self, product_id: &str) -> Result<Option<Product>> {
        let mut conn = get_connection(&self.pool)?;

        let row = products
            .select(ProductDB::as_select())
            .find(product_id)
            .first::<ProductDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(row.map(Product::from))
    }

    fn exists(&self, product_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;

        let count: i64 = products
            .filter(id.eq(product_id))
            .count()
            .get_result(&mut conn)
            .into_core()?;

        Ok(count > 0)
    }

    fn list(&self, offset: Option<i64>, limit: Option<i64>) -> Result<Vec<Product>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = products
            .select(ProductDB::as_select())
            .order(id.asc())
            .into_boxed();

        if let Some(skip) = offset {
            query = query.offset(skip);
        }
        if let Some(take) = limit {
            query = query.limit(take);
        }

        let rows = query.load::<ProductDB>(&mut conn).into_core()?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    fn list_for_category(&self, category_id: &str) -> Result<Vec<Product>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = categories_products::table
            .inner_join(products)
            .filter(categories_products::category_id.eq(category_id))
            .select(ProductDB::as_select())
            .order(id.asc())
            .load::<ProductDB>(&mut conn)
            .into_core()?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn create(&self, new_product: NewProduct) -> Result<Product> {
        let mut product_db: ProductDB = new_product.into();
        if product_db.id.is_empty() {
            product_db.id = uuid::Uuid::new_v4().to_string();
        }

        self.writer
            .exec(move |conn| {
                diesel::insert_into(products::table)
                    .values(&product_db)
                    .execute(conn)
                    .into_core()?;

                Ok(product_db.into())
            })
            .await
    }

    async fn update(&self, product_update: ProductUpdate) -> Result<Product> {
        self.writer
            .exec(move |conn| {
                let mut product_db: ProductDB = product_update.into();

                // Missing row surfaces as a not-found error here; the image
                // and enrichment columns are never taken from the caller.
                let existing = products
                    .select(ProductDB::as_select())
                    .find(&product_db.id)
                    .first::<ProductDB>(conn)
                    .into_core()?;

                product_db.ai_generated = existing.ai_generated;
                product_db.has_image = existing.has_image;
                product_db.image_extension = existing.image_extension;
                product_db.enrich_attempts = existing.enrich_attempts;
                product_db.enrich_next_attempt_at = existing.enrich_next_attempt_at;
                product_db.enrich_last_error = existing.enrich_last_error;
                product_db.created_at = existing.created_at;
                product_db.updated_at = chrono::Utc::now().naive_utc();

                diesel::update(products.find(&product_db.id))
                    .set(&product_db)
                    .execute(conn)
                    .into_core()?;

                Ok(product_db.into())
            })
            .await
    }

    async fn delete(&self, product_id: &str) -> Result<usize> {
        let target = product_id.to_string();

        self.writer
            .exec(move |conn| {
                // Order items and category links fall away via ON DELETE CASCADE.
                diesel::delete(products.filter(id.eq(&target)))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    async fn set_image(&self, product_id: &str, extension: &str) -> Result<()> {
        let target = product_id.to_string();
        let ext = extension.to_string();

        self.writer
            .exec(move |conn| {
                diesel::update(products.find(&target))
                    .set((
                        has_image.eq(true),
                        image_extension.eq(&ext),
                        updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;

                Ok(())
            })
            .await
    }

    async fn clear_image(&self, product_id: &str) -> Result<()> {
        let target = product_id.to_string();

        self.writer
            .exec(move |conn| {
                diesel::update(products.find(&target))
                    .set((
                        has_image.eq(false),
                        image_extension.eq(None::<String>),
                        updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;

                Ok(())
            })
            .await
    }

    fn list_image_claims(&self) -> Result<Vec<ImageClaim>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = products
            .filter(has_image.eq(true))
            .select((id, image_extension))
            .order(id.asc())
            .load::<(String, Option<String>)>(&mut conn)
            .into_core()?;

        Ok(rows
            .into_iter()
            .filter_map(|(product_id, ext)| {
                ext.map(|extension| ImageClaim {
                    product_id,
                    extension,
                })
            })
            .collect())
    }

    fn next_enrichment_candidate(
        &self,
        now: NaiveDateTime,
        max_attempts: i32,
    ) -> Result<Option<Product>> {
        let mut conn = get_connection(&self.pool)?;

        let row = products
            .filter(ai_generated.eq(false))
            .filter(enrich_attempts.lt(max_attempts))
            .filter(
                enrich_next_attempt_at
                    .is_null()
                    .or(enrich_next_attempt_at.le(now)),
            )
            .select(ProductDB::as_select())
            .order(id.asc())
            .first::<ProductDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(row.map(Product::from))
    }

    async fn apply_enrichment(&self, product_id: &str, description_text: &str) -> Result<()> {
        let target = product_id.to_string();
        let text = description_text.to_string();

        self.writer
            .exec(move |conn| {
                // One UPDATE, one transaction: the description and the flag
                // move together, and the failure bookkeeping resets.
                diesel::update(products.find(&target))
                    .set((
                        description.eq(&text),
                        ai_generated.eq(true),
                        enrich_attempts.eq(0),
                        enrich_next_attempt_at.eq(None::<NaiveDateTime>),
                        enrich_last_error.eq(None::<String>),
                        updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;

                Ok(())
            })
            .await
    }

    async fn record_enrichment_failure(
        &self,
        product_id: &str,
        error: &str,
        next_attempt_at: NaiveDateTime,
    ) -> Result<()> {
        let target = product_id.to_string();
        let message = error.to_string();

        self.writer
            .exec(move |conn| {
                diesel::update(products.find(&target))
                    .set((
                        enrich_attempts.eq(enrich_attempts + 1),
                        enrich_next_attempt_at.eq(next_attempt_at),
                        enrich_last_error.eq(&message),
                    ))
                    .execute(conn)
                    .into_core()?;

                Ok(())
            })
            .await
    }

    fn list_quarantined(&self, max_attempts: i32) -> Result<Vec<Product>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = products
            .filter(ai_generated.eq(false))
            .filter(enrich_attempts.ge(max_attempts))
            .select(ProductDB::as_select())
            .order(id.asc())
            .load::<ProductDB>(&mut conn)
            .into_core()?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}
