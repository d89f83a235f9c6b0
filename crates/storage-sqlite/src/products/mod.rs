//! SQLite storage implementation for products.

mod model;
mod repository;

pub use model::ProductDB;
pub use repository::ProductRepository;
