pub mod orders_model;
pub mod orders_service;
pub mod orders_traits;

#[cfg(test)]
mod orders_model_tests;

pub use orders_model::{Order, OrderSummary, Province, ORDER_DATE_FORMAT};
pub use orders_service::OrderService;
pub use orders_traits::{OrderRepositoryTrait, OrderServiceTrait};
