//! SQLite storage implementation for order items.

mod model;
mod repository;

pub use model::OrderItemDB;
pub use repository::OrderItemRepository;
