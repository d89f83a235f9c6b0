use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, Result};
use crate::schema::categories;
use crate::schema::categories::dsl::*;
use crate::schema::categories_products;

use super::model::{CategoryDB, CategoryProductDB};
use storefront_core::categories::{
    Category, CategoryRepositoryTrait, CategoryUpdate, NewCategory,
};

/// Repository for managing categories and their product links.
pub struct CategoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn get_by_id(&self, category_id: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;

        let row = categories
            .select(CategoryDB::as_select())
            .find(category_id)
            .first::<CategoryDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(row.map(Category::from))
    }

    fn exists(&self, category_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;

        let count: i64 = categories
            .filter(id.eq(category_id))
            .count()
            .get_result(&mut conn)
            .into_core()?;

        Ok(count > 0)
    }

    fn list(&self) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = categories
            .select(CategoryDB::as_select())
            .order(id.asc())
            .load::<CategoryDB>(&mut conn)
            .into_core()?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    fn list_for_product(&self, product_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = categories_products::table
            .inner_join(categories)
            .filter(categories_products::product_id.eq(product_id))
            .select(CategoryDB::as_select())
            .order(id.asc())
            .load::<CategoryDB>(&mut conn)
            .into_core()?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn create(&self, new_category: NewCategory) -> Result<Category> {
        let mut category_db: CategoryDB = new_category.into();
        if category_db.id.is_empty() {
            category_db.id = uuid::Uuid::new_v4().to_string();
        }

        self.writer
            .exec(move |conn| {
                diesel::insert_into(categories::table)
                    .values(&category_db)
                    .execute(conn)
                    .into_core()?;

                Ok(category_db.into())
            })
            .await
    }

    async fn update(&self, category_update: CategoryUpdate) -> Result<Category> {
        self.writer
            .exec(move |conn| {
                let mut category_db: CategoryDB = category_update.into();

                let existing = categories
                    .select(CategoryDB::as_select())
                    .find(&category_db.id)
                    .first::<CategoryDB>(conn)
                    .into_core()?;

                category_db.created_at = existing.created_at;
                category_db.updated_at = chrono::Utc::now().naive_utc();

                diesel::update(categories.find(&category_db.id))
                    .set(&category_db)
                    .execute(conn)
                    .into_core()?;

                Ok(category_db.into())
            })
            .await
    }

    async fn delete(&self, category_id: &str) -> Result<usize> {
        let target = category_id.to_string();

        self.writer
            .exec(move |conn| {
                // Association edges fall away via ON DELETE CASCADE.
                diesel::delete(categories.filter(id.eq(&target)))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    async fn link_product(&self, category_id: &str, product_id: &str) -> Result<()> {
        let edge = CategoryProductDB {
            category_id: category_id.to_string(),
            product_id: product_id.to_string(),
        };

        self.writer
            .exec(move |conn| {
                // An existing edge is left alone, which makes retries safe.
                diesel::insert_into(categories_products::table)
                    .values(&edge)
                    .on_conflict_do_nothing()
                    .execute(conn)
                    .into_core()?;

                Ok(())
            })
            .await
    }

    async fn unlink_product(&self, category_id: &str, product_id: &str) -> Result<()> {
        let category_value = category_id.to_string();
        let product_value = product_id.to_string();

        self.writer
            .exec(move |conn| {
                diesel::delete(
                    categories_products::table
                        .filter(categories_products::category_id.eq(&category_value))
                        .filter(categories_products::product_id.eq(&product_value)),
                )
                .execute(conn)
                .into_core()?;

                Ok(())
            })
            .await
    }
}
