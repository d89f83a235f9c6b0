//! SQLite read surface for the customer roster.

mod model;
mod repository;

pub use model::UserDB;
pub use repository::CustomerDirectory;
