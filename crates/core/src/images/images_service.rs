use async_trait::async_trait;
use log::{error, info, warn};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use super::images_store::ImageStoreTrait;
use crate::constants::DEFAULT_PRODUCT_IMAGE_FILE;
use crate::errors::Result;
use crate::outcome::MutationOutcome;
use crate::products::ProductRepositoryTrait;

/// Extensions accepted for product image uploads, lower-case with the dot.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 4] = [".jpeg", ".jpg", ".png", ".gif"];

/// Lower-cased extension of a file name, including the leading dot.
fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
}

/// Result of one sweep reconciling image rows against stored files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReconcileReport {
    /// Products whose image flag was cleared because the file is gone.
    pub cleared_flags: Vec<String>,
    /// Files removed because no product row claims them.
    pub removed_files: Vec<String>,
}

/// Trait defining the contract for product image operations.
#[async_trait]
pub trait ImageServiceTrait: Send + Sync {
    /// Stores a new image for a product and records it on the row.
    async fn set_image(
        &self,
        product_id: &str,
        bytes: &[u8],
        original_filename: &str,
    ) -> MutationOutcome;

    /// Brings image rows and stored files back in line with each other.
    async fn reconcile(&self) -> Result<ImageReconcileReport>;
}

/// Service owning the product image lifecycle.
///
/// The flag and extension columns on the product row are mutated here and
/// nowhere else; the generic product update path never touches them.
pub struct ImageService {
    repository: Arc<dyn ProductRepositoryTrait>,
    store: Arc<dyn ImageStoreTrait>,
}

impl ImageService {
    pub fn new(repository: Arc<dyn ProductRepositoryTrait>, store: Arc<dyn ImageStoreTrait>) -> Self {
        Self { repository, store }
    }

    async fn try_set_image(
        &self,
        product_id: &str,
        bytes: &[u8],
        original_filename: &str,
    ) -> Result<MutationOutcome> {
        let product = match self.repository.get_by_id(product_id)? {
            Some(product) => product,
            None => {
                return Ok(MutationOutcome::not_found(vec![
                    "Product was not found.".to_string(),
                ]))
            }
        };

        if bytes.is_empty() {
            return Ok(MutationOutcome::error(vec![
                "No File Content".to_string(),
                "No picture included".to_string(),
            ]));
        }

        let extension = match extension_of(original_filename) {
            Some(extension) => extension,
            None => {
                return Ok(MutationOutcome::error(vec![format!(
                    "{} does not have a file extension.",
                    original_filename
                )]))
            }
        };
        if !ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            return Ok(MutationOutcome::error(vec![format!(
                "{} is not an accepted image extension.",
                extension
            )]));
        }

        // Best-effort removal of the previous file; one already gone is fine.
        if product.has_image {
            if let Some(old_extension) = &product.image_extension {
                let old_file = format!("{}{}", product.id, old_extension);
                if let Err(e) = self.store.delete(&old_file) {
                    warn!("Could not remove previous image {}: {}", old_file, e);
                }
            }
        }

        let file_name = format!("{}{}", product.id, extension);
        if let Err(e) = self.store.write(&file_name, bytes) {
            error!("Failed to store image {}: {}", file_name, e);
            return Ok(MutationOutcome::error(vec![
                "There was an issue uploading the product image".to_string(),
                e.to_string(),
            ]));
        }

        // The row is only touched once the file is known to be in place.
        // A failure here leaves an unclaimed file for reconcile to collect.
        if let Err(e) = self.repository.set_image(product_id, &extension).await {
            error!("Image {} stored but the row update failed: {}", file_name, e);
            return Ok(MutationOutcome::error(vec![
                "An error occurred updating the record".to_string(),
                e.to_string(),
            ]));
        }

        info!("Updated image for product {} to {}", product_id, file_name);
        Ok(MutationOutcome::updated())
    }
}

#[async_trait]
impl ImageServiceTrait for ImageService {
    async fn set_image(
        &self,
        product_id: &str,
        bytes: &[u8],
        original_filename: &str,
    ) -> MutationOutcome {
        self.try_set_image(product_id, bytes, original_filename)
            .await
            .unwrap_or_else(MutationOutcome::from_error)
    }

    async fn reconcile(&self) -> Result<ImageReconcileReport> {
        let mut report = ImageReconcileReport::default();
        let claims = self.repository.list_image_claims()?;

        // Rows pointing at files that no longer exist lose their flag.
        for claim in &claims {
            if !self.store.exists(&claim.file_name()) {
                warn!(
                    "Product {} claims image {} but the file is missing; clearing the flag",
                    claim.product_id,
                    claim.file_name()
                );
                self.repository.clear_image(&claim.product_id).await?;
                report.cleared_flags.push(claim.product_id.clone());
            }
        }

        // Stored files no row claims are deleted, except the shared default.
        for file_name in self.store.list()? {
            if file_name == DEFAULT_PRODUCT_IMAGE_FILE {
                continue;
            }
            if !claims.iter().any(|c| c.file_name() == file_name) {
                warn!("Removing unclaimed image file {}", file_name);
                self.store.delete(&file_name)?;
                report.removed_files.push(file_name);
            }
        }

        if !report.cleared_flags.is_empty() || !report.removed_files.is_empty() {
            info!(
                "Image reconcile cleared {} flags and removed {} files",
                report.cleared_flags.len(),
                report.removed_files.len()
            );
        }
        Ok(report)
    }
}
