//! SQLite read surface for orders.

mod model;
mod repository;

pub use model::OrderDB;
pub use repository::OrderRepository;
