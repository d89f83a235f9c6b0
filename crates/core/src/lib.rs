//! Storefront Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the storefront backend: the
//! catalog (products, categories and their association), the sales records
//! (orders and order items), the customer directory, the product-image
//! lifecycle, and the background description-enrichment worker.
//!
//! It is database-agnostic and defines traits that are implemented by the
//! `storage-sqlite` crate. HTTP routing, authentication, and session
//! management live upstream; callers arrive here already resolved to a
//! [`identity::Caller`].

pub mod categories;
pub mod constants;
pub mod customers;
pub mod enrichment;
pub mod errors;
pub mod identity;
pub mod images;
pub mod order_items;
pub mod orders;
pub mod outcome;
pub mod products;
pub mod utils;
pub mod validation;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

// Re-export the mutation protocol types
pub use outcome::{MutationOutcome, MutationStatus};

// Re-export the caller identity
pub use identity::Caller;
