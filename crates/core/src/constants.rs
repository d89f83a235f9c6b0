//! Shared constants for the storefront backend.

/// Web-facing prefix under which product images are served.
pub const PRODUCT_IMAGE_URL_PREFIX: &str = "/images/products";

/// Path served for products without a stored image.
pub const DEFAULT_PRODUCT_IMAGE_PATH: &str = "/images/products/default.jpg";

/// File name of the shared default image inside the image directory.
/// The reconciliation sweep must never treat it as an orphan.
pub const DEFAULT_PRODUCT_IMAGE_FILE: &str = "default.jpg";
