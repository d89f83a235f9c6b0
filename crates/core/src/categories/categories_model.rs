//! Category domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Domain model representing a catalog category.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Display color used by the storefront UI (e.g. "#ff8800").
    pub color: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub color: String,
}

impl NewCategory {
    /// Validates the new category data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Category name cannot be empty".to_string(),
            )));
        }
        if self.color.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Category color cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for replacing an existing category's fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub color: String,
}

impl CategoryUpdate {
    /// Validates the category update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.as_deref().unwrap_or("").trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Category ID is required for updates".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Category name cannot be empty".to_string(),
            )));
        }
        if self.color.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Category color cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}
