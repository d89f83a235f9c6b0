pub mod customers_model;
pub mod customers_service;
pub mod customers_traits;


pub use customers_model::Customer;
pub use customers_service::CustomerService;
pub use customers_traits::{CustomerDirectoryTrait, CustomerServiceTrait};
