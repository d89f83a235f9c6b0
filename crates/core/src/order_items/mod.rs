pub mod order_items_model;
pub mod order_items_service;
pub mod order_items_traits;


pub use order_items_model::{NewOrderItem, OrderItem, OrderItemDetails, OrderItemUpdate};
pub use order_items_service::OrderItemService;
pub use order_items_traits::{OrderItemRepositoryTrait, OrderItemServiceTrait};
