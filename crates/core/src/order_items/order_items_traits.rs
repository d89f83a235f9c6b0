use async_trait::async_trait;

use super::order_items_model::{NewOrderItem, OrderItem, OrderItemDetails, OrderItemUpdate};
use crate::errors::Result;
use crate::identity::Caller;
use crate::outcome::MutationOutcome;

/// Trait defining the contract for OrderItem repository operations.
#[async_trait]
pub trait OrderItemRepositoryTrait: Send + Sync {
    /// Retrieves an order item row by its ID.
    fn get_by_id(&self, order_item_id: &str) -> Result<Option<OrderItem>>;

    /// Retrieves an order item joined with its product, order, and owner.
    fn get_details(&self, order_item_id: &str) -> Result<Option<OrderItemDetails>>;

    /// All order items joined with their context, ordered by ID ascending.
    fn list_details(&self) -> Result<Vec<OrderItemDetails>>;

    /// Items of one order, narrowed inside the query.
    fn list_details_for_order(&self, order_id: &str) -> Result<Vec<OrderItemDetails>>;

    /// Items referencing one product, narrowed inside the query.
    fn list_details_for_product(&self, product_id: &str) -> Result<Vec<OrderItemDetails>>;

    /// Creates a new order item; the implementation assigns the ID when the
    /// input carries none. Callers must have resolved both references first.
    async fn create(&self, new_order_item: NewOrderItem) -> Result<OrderItem>;

    /// Replaces an order item's fields. Fails with a not-found database
    /// error when the row is missing; never inserts.
    async fn update(&self, update: OrderItemUpdate) -> Result<OrderItem>;

    /// Deletes an order item. Returns the number of deleted rows.
    async fn delete(&self, order_item_id: &str) -> Result<usize>;
}

/// Trait defining the contract for OrderItem service operations.
#[async_trait]
pub trait OrderItemServiceTrait: Send + Sync {
    /// One order item under the caller's visibility. An item on another
    /// customer's order reads exactly like an item that does not exist.
    fn get_order_item(&self, caller: &Caller, order_item_id: &str)
        -> Result<Option<OrderItemDetails>>;

    /// Every order item in the store. Admin surface; gated upstream.
    fn list_order_items(&self) -> Result<Vec<OrderItemDetails>>;

    /// Items of one order, visible only to its owner or an administrator.
    /// A foreign or missing order yields an empty listing.
    fn list_order_items_for_order(
        &self,
        caller: &Caller,
        order_id: &str,
    ) -> Result<Vec<OrderItemDetails>>;

    /// Items referencing one product. Admin surface; gated upstream.
    fn list_order_items_for_product(&self, product_id: &str) -> Result<Vec<OrderItemDetails>>;

    /// Adds an order item once both its references resolve.
    async fn add_order_item(&self, new_order_item: NewOrderItem) -> MutationOutcome;

    /// Replaces an order item once both its references resolve.
    async fn update_order_item(&self, update: OrderItemUpdate) -> MutationOutcome;

    /// Deletes an order item.
    async fn delete_order_item(&self, order_item_id: &str) -> MutationOutcome;
}
