use super::orders_model::{Order, OrderSummary};
use crate::errors::Result;
use crate::identity::Caller;

/// Read access to orders. Checkout owns the write path, so no mutation
/// methods appear here.
pub trait OrderRepositoryTrait: Send + Sync {
    /// Retrieves an order by its ID.
    fn get_by_id(&self, order_id: &str) -> Result<Option<Order>>;

    /// Checks whether an order with this ID exists.
    fn exists(&self, order_id: &str) -> Result<bool>;

    /// Owning customer id of an order, when the order exists.
    fn owner_of(&self, order_id: &str) -> Result<Option<String>>;

    /// Flattened summaries ordered by order ID ascending. `Some(id)`
    /// restricts the query itself to that customer's orders.
    fn list_summaries(&self, customer_id: Option<&str>) -> Result<Vec<OrderSummary>>;
}

/// Trait defining the contract for order read operations.
pub trait OrderServiceTrait: Send + Sync {
    /// One order under the caller's visibility. An order owned by another
    /// customer reads exactly like an order that does not exist.
    fn get_order(&self, caller: &Caller, order_id: &str) -> Result<Option<Order>>;

    /// Every order in the store. Admin surface; gated upstream.
    fn list_orders(&self) -> Result<Vec<OrderSummary>>;

    /// Orders belonging to one customer. Admin surface; gated upstream.
    fn list_orders_for_customer(&self, customer_id: &str) -> Result<Vec<OrderSummary>>;

    /// The caller's own orders, narrowed inside the store query.
    fn list_my_orders(&self, caller: &Caller) -> Result<Vec<OrderSummary>>;
}
