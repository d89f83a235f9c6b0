use log::{debug, error};
use std::sync::Arc;

use super::categories_model::{Category, CategoryUpdate, NewCategory};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::outcome::{MutationOutcome, MutationStatus};
use crate::products::ProductRepositoryTrait;
use crate::validation::ReferenceChecks;

/// Service for managing categories and their product links
pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
    products: Arc<dyn ProductRepositoryTrait>,
}

impl CategoryService {
    /// Creates a new CategoryService instance
    pub fn new(
        repository: Arc<dyn CategoryRepositoryTrait>,
        products: Arc<dyn ProductRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            products,
        }
    }

    /// Resolves both association endpoints before any edge mutation.
    fn check_endpoints(&self, category_id: &str, product_id: &str) -> Result<ReferenceChecks> {
        let mut checks = ReferenceChecks::new();
        checks.require(self.products.exists(product_id)?, "Product was not found.");
        checks.require(
            self.repository.exists(category_id)?,
            "Category was not found.",
        );
        Ok(checks)
    }

    async fn try_link_product(&self, category_id: &str, product_id: &str) -> Result<MutationOutcome> {
        if let Some(outcome) = self.check_endpoints(category_id, product_id)?.into_outcome() {
            return Ok(outcome);
        }

        match self.repository.link_product(category_id, product_id).await {
            Ok(()) => {
                debug!("Linked product {} to category {}", product_id, category_id);
                Ok(MutationOutcome::new(MutationStatus::Created))
            }
            Err(e) => {
                error!(
                    "Failed to link product {} to category {}: {}",
                    product_id, category_id, e
                );
                Ok(MutationOutcome::error(vec![
                    "There was an issue linking the product to the category".to_string(),
                    e.to_string(),
                ]))
            }
        }
    }

    async fn try_unlink_product(
        &self,
        category_id: &str,
        product_id: &str,
    ) -> Result<MutationOutcome> {
        if let Some(outcome) = self.check_endpoints(category_id, product_id)?.into_outcome() {
            return Ok(outcome);
        }

        match self.repository.unlink_product(category_id, product_id).await {
            Ok(()) => {
                debug!(
                    "Unlinked product {} from category {}",
                    product_id, category_id
                );
                Ok(MutationOutcome::deleted())
            }
            Err(e) => {
                error!(
                    "Failed to unlink product {} from category {}: {}",
                    product_id, category_id, e
                );
                Ok(MutationOutcome::error(vec![
                    "There was an issue unlinking the product to the category".to_string(),
                    e.to_string(),
                ]))
            }
        }
    }
}

#[async_trait::async_trait]
impl CategoryServiceTrait for CategoryService {
    fn list_categories(&self) -> Result<Vec<Category>> {
        self.repository.list()
    }

    fn get_category(&self, category_id: &str) -> Result<Option<Category>> {
        self.repository.get_by_id(category_id)
    }

    fn list_categories_for_product(&self, product_id: &str) -> Result<Vec<Category>> {
        self.repository.list_for_product(product_id)
    }

    /// Adds a category and reports the created ID
    async fn add_category(&self, new_category: NewCategory) -> MutationOutcome {
        if let Err(e) = new_category.validate() {
            return MutationOutcome::error(vec![e.to_string()]);
        }

        match self.repository.create(new_category).await {
            Ok(category) => {
                debug!("Added category {}", category.id);
                MutationOutcome::created(category.id)
            }
            Err(e) => {
                error!("Failed to add category: {}", e);
                MutationOutcome::error(vec![
                    "There was an error adding the Category.".to_string(),
                    e.to_string(),
                ])
            }
        }
    }

    /// Replaces a category's fields
    async fn update_category(&self, update: CategoryUpdate) -> MutationOutcome {
        if let Err(e) = update.validate() {
            return MutationOutcome::error(vec![e.to_string()]);
        }

        match self.repository.update(update).await {
            Ok(_) => MutationOutcome::updated(),
            Err(Error::Database(DatabaseError::NotFound(_))) => {
                MutationOutcome::not_found(vec!["Category was not found.".to_string()])
            }
            Err(e) => {
                error!("Failed to update category: {}", e);
                MutationOutcome::error(vec![
                    "An error occurred updating the record".to_string(),
                    e.to_string(),
                ])
            }
        }
    }

    /// Deletes a category; its product links go with it
    async fn delete_category(&self, category_id: &str) -> MutationOutcome {
        match self.repository.delete(category_id).await {
            Ok(0) => MutationOutcome::not_found(vec![
                "Category cannot be deleted because it does not exist.".to_string(),
            ]),
            Ok(_) => {
                debug!("Deleted category {}", category_id);
                MutationOutcome::deleted()
            }
            Err(e) => {
                error!("Failed to delete category {}: {}", category_id, e);
                MutationOutcome::error(vec![
                    "Error encountered while deleting the category".to_string(),
                    e.to_string(),
                ])
            }
        }
    }

    async fn link_product(&self, category_id: &str, product_id: &str) -> MutationOutcome {
        self.try_link_product(category_id, product_id)
            .await
            .unwrap_or_else(MutationOutcome::from_error)
    }

    async fn unlink_product(&self, category_id: &str, product_id: &str) -> MutationOutcome {
        self.try_unlink_product(category_id, product_id)
            .await
            .unwrap_or_else(MutationOutcome::from_error)
    }
}
