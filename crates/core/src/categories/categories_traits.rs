//! Category repository and service traits.

use async_trait::async_trait;

use super::categories_model::{Category, CategoryUpdate, NewCategory};
use crate::errors::Result;
use crate::outcome::MutationOutcome;

/// Trait defining the contract for Category repository operations,
/// including the category/product association edges.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    /// Retrieves a category by its ID.
    fn get_by_id(&self, category_id: &str) -> Result<Option<Category>>;

    /// Checks whether a category with this ID exists.
    fn exists(&self, category_id: &str) -> Result<bool>;

    /// Lists categories ordered by ID ascending.
    fn list(&self) -> Result<Vec<Category>>;

    /// Lists the categories a product is linked to, ordered by ID ascending.
    fn list_for_product(&self, product_id: &str) -> Result<Vec<Category>>;

    /// Creates a new category; the implementation assigns the ID when the
    /// input carries none.
    async fn create(&self, new_category: NewCategory) -> Result<Category>;

    /// Replaces a category's fields. Fails with a not-found database error
    /// when the row is missing; never inserts.
    async fn update(&self, update: CategoryUpdate) -> Result<Category>;

    /// Deletes a category, cascading to its association edges.
    /// Returns the number of deleted category rows.
    async fn delete(&self, category_id: &str) -> Result<usize>;

    /// Inserts the association edge. Idempotent: inserting an existing
    /// edge is a no-op.
    async fn link_product(&self, category_id: &str, product_id: &str) -> Result<()>;

    /// Removes the association edge. Removing an absent edge is a no-op.
    async fn unlink_product(&self, category_id: &str, product_id: &str) -> Result<()>;
}

/// Trait defining the contract for Category service operations.
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    /// Lists all categories.
    fn list_categories(&self) -> Result<Vec<Category>>;

    /// Retrieves one category, or None when it does not exist.
    fn get_category(&self, category_id: &str) -> Result<Option<Category>>;

    /// Lists the categories a product is linked to.
    fn list_categories_for_product(&self, product_id: &str) -> Result<Vec<Category>>;

    /// Adds a category after validation.
    async fn add_category(&self, new_category: NewCategory) -> MutationOutcome;

    /// Replaces a category's fields.
    async fn update_category(&self, update: CategoryUpdate) -> MutationOutcome;

    /// Deletes a category together with its product links.
    async fn delete_category(&self, category_id: &str) -> MutationOutcome;

    /// Links a product to a category after resolving both endpoints.
    async fn link_product(&self, category_id: &str, product_id: &str) -> MutationOutcome;

    /// Unlinks a product from a category after resolving both endpoints.
    async fn unlink_product(&self, category_id: &str, product_id: &str) -> MutationOutcome;
}
