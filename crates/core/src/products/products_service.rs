use log::{debug, error};
use std::sync::Arc;

use super::products_model::{NewProduct, Product, ProductUpdate};
use super::products_traits::{ProductRepositoryTrait, ProductServiceTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::outcome::MutationOutcome;
use crate::utils::sanitize::sanitize_html;

/// Service for managing catalog products
pub struct ProductService {
    repository: Arc<dyn ProductRepositoryTrait>,
}

impl ProductService {
    /// Creates a new ProductService instance
    pub fn new(repository: Arc<dyn ProductRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl ProductServiceTrait for ProductService {
    fn list_products(&self, offset: Option<i64>, limit: Option<i64>) -> Result<Vec<Product>> {
        self.repository.list(offset, limit)
    }

    fn get_product(&self, product_id: &str) -> Result<Option<Product>> {
        self.repository.get_by_id(product_id)
    }

    fn list_products_for_category(&self, category_id: &str) -> Result<Vec<Product>> {
        self.repository.list_for_category(category_id)
    }

    /// Adds a product and reports the created ID
    async fn add_product(&self, new_product: NewProduct) -> MutationOutcome {
        if let Err(e) = new_product.validate() {
            return MutationOutcome::error(vec![e.to_string()]);
        }

        let new_product = NewProduct {
            description: new_product.description.map(|d| sanitize_html(&d)),
            ..new_product
        };

        match self.repository.create(new_product).await {
            Ok(product) => {
                debug!("Added product {}", product.id);
                MutationOutcome::created(product.id)
            }
            Err(e) => {
                error!("Failed to add product: {}", e);
                MutationOutcome::error(vec![
                    "There was an error adding the Product.".to_string(),
                    e.to_string(),
                ])
            }
        }
    }

    /// Replaces a product's scalar fields
    async fn update_product(&self, update: ProductUpdate) -> MutationOutcome {
        if let Err(e) = update.validate() {
            return MutationOutcome::error(vec![e.to_string()]);
        }

        let update = ProductUpdate {
            description: update.description.map(|d| sanitize_html(&d)),
            ..update
        };

        match self.repository.update(update).await {
            Ok(_) => MutationOutcome::updated(),
            Err(Error::Database(DatabaseError::NotFound(_))) => {
                MutationOutcome::not_found(vec!["Product was not found.".to_string()])
            }
            Err(e) => {
                error!("Failed to update product: {}", e);
                MutationOutcome::error(vec![
                    "An error occurred updating the record".to_string(),
                    e.to_string(),
                ])
            }
        }
    }

    /// Deletes a product; order items and category links go with it
    async fn delete_product(&self, product_id: &str) -> MutationOutcome {
        match self.repository.delete(product_id).await {
            Ok(0) => MutationOutcome::not_found(vec![
                "Product cannot be deleted because it does not exist.".to_string(),
            ]),
            Ok(_) => {
                debug!("Deleted product {}", product_id);
                MutationOutcome::deleted()
            }
            Err(e) => {
                error!("Failed to delete product {}: {}", product_id, e);
                MutationOutcome::error(vec![
                    "Error encountered while deleting the Product".to_string(),
                    e.to_string(),
                ])
            }
        }
    }
}
