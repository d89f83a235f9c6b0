//! SQLite storage implementation for categories.

mod model;
mod repository;

pub use model::{CategoryDB, CategoryProductDB};
pub use repository::CategoryRepository;
