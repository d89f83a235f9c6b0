//! Product domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PRODUCT_IMAGE_PATH, PRODUCT_IMAGE_URL_PREFIX};
use crate::{errors::ValidationError, Error, Result};

/// Domain model representing a catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub description: Option<String>,
    /// Set by the enrichment worker once a description was generated.
    /// The generic update path never touches it.
    pub ai_generated: bool,
    /// Set by the image lifecycle when a stored image exists.
    pub has_image: bool,
    /// Extension of the stored image, dot included (".png").
    pub image_extension: Option<String>,
    /// Failed enrichment attempts so far; at the configured budget the row
    /// is quarantined out of candidate selection.
    pub enrich_attempts: i32,
    /// Earliest time the next enrichment attempt may run.
    pub enrich_next_attempt_at: Option<NaiveDateTime>,
    /// Rendering of the most recent enrichment failure.
    pub enrich_last_error: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Web path of the product image: the stored file when one exists,
    /// otherwise the shared default image.
    pub fn image_path(&self) -> String {
        match (&self.has_image, &self.image_extension) {
            (true, Some(extension)) => {
                format!("{}/{}{}", PRODUCT_IMAGE_URL_PREFIX, self.id, extension)
            }
            _ => DEFAULT_PRODUCT_IMAGE_PATH.to_string(),
        }
    }
}

/// A product's claim on a stored image file, as recorded in its row.
/// Used by the reconciliation sweep to compare rows against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageClaim {
    pub product_id: String,
    /// Extension with its leading dot.
    pub extension: String,
}

impl ImageClaim {
    /// Name of the file this claim points at.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.product_id, self.extension)
    }
}

/// Input model for creating a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub description: Option<String>,
}

impl NewProduct {
    /// Validates the new product data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Product name cannot be empty".to_string(),
            )));
        }
        if self.sku.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Product SKU cannot be empty".to_string(),
            )));
        }
        if self.price.is_sign_negative() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Product price cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for replacing an existing product's scalar fields.
///
/// The image columns, the ai-generated flag, and the enrichment bookkeeping
/// are deliberately absent: those belong to the image lifecycle and the
/// enrichment worker respectively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub id: Option<String>,
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub description: Option<String>,
}

impl ProductUpdate {
    /// Validates the product update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.as_deref().unwrap_or("").trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Product ID is required for updates".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Product name cannot be empty".to_string(),
            )));
        }
        if self.sku.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Product SKU cannot be empty".to_string(),
            )));
        }
        if self.price.is_sign_negative() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Product price cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}
