//! Product repository and service traits.
//!
//! These traits define the contract for product operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::products_model::{ImageClaim, NewProduct, Product, ProductUpdate};
use crate::errors::Result;
use crate::outcome::MutationOutcome;

/// Trait defining the contract for Product repository operations.
///
/// Reads run on a pooled connection; writes go through the single-writer
/// task, each inside its own transaction.
#[async_trait]
pub trait ProductRepositoryTrait: Send + Sync {
    /// Retrieves a product by its ID.
    fn get_by_id(&self, product_id: &str) -> Result<Option<Product>>;

    /// Checks whether a product with this ID exists.
    fn exists(&self, product_id: &str) -> Result<bool>;

    /// Lists products ordered by ID ascending, with optional pagination.
    fn list(&self, offset: Option<i64>, limit: Option<i64>) -> Result<Vec<Product>>;

    /// Lists the products linked to a category, ordered by ID ascending.
    fn list_for_category(&self, category_id: &str) -> Result<Vec<Product>>;

    /// Creates a new product; the implementation assigns the ID when the
    /// input carries none.
    async fn create(&self, new_product: NewProduct) -> Result<Product>;

    /// Replaces a product's scalar fields. Fails with a not-found database
    /// error when the row is missing; never inserts.
    async fn update(&self, update: ProductUpdate) -> Result<Product>;

    /// Deletes a product, cascading to its order items and association
    /// edges. Returns the number of deleted product rows.
    async fn delete(&self, product_id: &str) -> Result<usize>;

    // --- image lifecycle columns ---

    /// Records that a stored image with this extension now exists.
    async fn set_image(&self, product_id: &str, extension: &str) -> Result<()>;

    /// Clears the image flag and extension.
    async fn clear_image(&self, product_id: &str) -> Result<()>;

    /// All rows currently claiming a stored image.
    fn list_image_claims(&self) -> Result<Vec<ImageClaim>>;

    // --- enrichment bookkeeping ---

    /// First product (by ID) still awaiting enrichment whose backoff has
    /// elapsed and whose attempt count is below `max_attempts`.
    fn next_enrichment_candidate(
        &self,
        now: NaiveDateTime,
        max_attempts: i32,
    ) -> Result<Option<Product>>;

    /// Persists a generated description and sets the ai-generated flag in
    /// one transaction, clearing any failure bookkeeping.
    async fn apply_enrichment(&self, product_id: &str, description: &str) -> Result<()>;

    /// Records a failed enrichment attempt: bumps the attempt count, stores
    /// the error, and schedules the next attempt.
    async fn record_enrichment_failure(
        &self,
        product_id: &str,
        error: &str,
        next_attempt_at: NaiveDateTime,
    ) -> Result<()>;

    /// Rows that exhausted their enrichment attempt budget.
    fn list_quarantined(&self, max_attempts: i32) -> Result<Vec<Product>>;
}

/// Trait defining the contract for Product service operations.
#[async_trait]
pub trait ProductServiceTrait: Send + Sync {
    /// Lists catalog products ordered by ID, with optional offset/limit.
    fn list_products(&self, offset: Option<i64>, limit: Option<i64>) -> Result<Vec<Product>>;

    /// Retrieves one product, or None when it does not exist.
    fn get_product(&self, product_id: &str) -> Result<Option<Product>>;

    /// Lists the products linked to a category.
    fn list_products_for_category(&self, category_id: &str) -> Result<Vec<Product>>;

    /// Adds a product after validation; descriptions are sanitized.
    async fn add_product(&self, new_product: NewProduct) -> MutationOutcome;

    /// Replaces a product's scalar fields; descriptions are sanitized.
    async fn update_product(&self, update: ProductUpdate) -> MutationOutcome;

    /// Deletes a product together with its order items and category links.
    async fn delete_product(&self, product_id: &str) -> MutationOutcome;
}
