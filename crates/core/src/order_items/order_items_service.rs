use log::{debug, error};
use std::sync::Arc;

use super::order_items_model::{NewOrderItem, OrderItemDetails, OrderItemUpdate};
use super::order_items_traits::{OrderItemRepositoryTrait, OrderItemServiceTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::identity::Caller;
use crate::orders::OrderRepositoryTrait;
use crate::outcome::MutationOutcome;
use crate::products::ProductRepositoryTrait;
use crate::validation::ReferenceChecks;

/// Service for managing order items under ownership scoping
pub struct OrderItemService {
    repository: Arc<dyn OrderItemRepositoryTrait>,
    orders: Arc<dyn OrderRepositoryTrait>,
    products: Arc<dyn ProductRepositoryTrait>,
}

impl OrderItemService {
    /// Creates a new OrderItemService instance
    pub fn new(
        repository: Arc<dyn OrderItemRepositoryTrait>,
        orders: Arc<dyn OrderRepositoryTrait>,
        products: Arc<dyn ProductRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            orders,
            products,
        }
    }

    /// Resolves both foreign references before any write.
    fn check_references(&self, product_id: &str, order_id: &str) -> Result<ReferenceChecks> {
        let mut checks = ReferenceChecks::new();
        checks.require(self.products.exists(product_id)?, "Product was not found.");
        checks.require(self.orders.exists(order_id)?, "Order was not found.");
        Ok(checks)
    }

    async fn try_add(&self, new_order_item: NewOrderItem) -> Result<MutationOutcome> {
        if let Some(outcome) = self
            .check_references(&new_order_item.product_id, &new_order_item.order_id)?
            .into_outcome()
        {
            return Ok(outcome);
        }

        match self.repository.create(new_order_item).await {
            Ok(order_item) => {
                debug!("Added order item {}", order_item.id);
                Ok(MutationOutcome::created(order_item.id))
            }
            Err(e) => {
                error!("Failed to add order item: {}", e);
                Ok(MutationOutcome::error(vec![
                    "There was an error adding the Order Item.".to_string(),
                    e.to_string(),
                ]))
            }
        }
    }

    async fn try_update(&self, update: OrderItemUpdate) -> Result<MutationOutcome> {
        if let Some(outcome) = self
            .check_references(&update.product_id, &update.order_id)?
            .into_outcome()
        {
            return Ok(outcome);
        }

        match self.repository.update(update).await {
            Ok(_) => Ok(MutationOutcome::updated()),
            Err(Error::Database(DatabaseError::NotFound(_))) => Ok(MutationOutcome::not_found(
                vec!["Order Item was not found.".to_string()],
            )),
            Err(e) => {
                error!("Failed to update order item: {}", e);
                Ok(MutationOutcome::error(vec![
                    "An error occurred updating the record".to_string(),
                    e.to_string(),
                ]))
            }
        }
    }
}

#[async_trait::async_trait]
impl OrderItemServiceTrait for OrderItemService {
    fn get_order_item(
        &self,
        caller: &Caller,
        order_item_id: &str,
    ) -> Result<Option<OrderItemDetails>> {
        let details = match self.repository.get_details(order_item_id)? {
            Some(details) => details,
            None => return Ok(None),
        };

        // An item on a foreign order must read exactly like a missing one.
        if caller.may_access(&details.customer_id) {
            Ok(Some(details))
        } else {
            Ok(None)
        }
    }

    fn list_order_items(&self) -> Result<Vec<OrderItemDetails>> {
        self.repository.list_details()
    }

    fn list_order_items_for_order(
        &self,
        caller: &Caller,
        order_id: &str,
    ) -> Result<Vec<OrderItemDetails>> {
        // One owner lookup scopes the whole listing; the query itself is
        // already narrowed to the order.
        match self.orders.owner_of(order_id)? {
            Some(owner) if caller.may_access(&owner) => {
                self.repository.list_details_for_order(order_id)
            }
            _ => Ok(Vec::new()),
        }
    }

    fn list_order_items_for_product(&self, product_id: &str) -> Result<Vec<OrderItemDetails>> {
        self.repository.list_details_for_product(product_id)
    }

    /// Adds an order item and reports the created ID
    async fn add_order_item(&self, new_order_item: NewOrderItem) -> MutationOutcome {
        if let Err(e) = new_order_item.validate() {
            return MutationOutcome::error(vec![e.to_string()]);
        }

        self.try_add(new_order_item)
            .await
            .unwrap_or_else(MutationOutcome::from_error)
    }

    /// Replaces an order item's fields
    async fn update_order_item(&self, update: OrderItemUpdate) -> MutationOutcome {
        if let Err(e) = update.validate() {
            return MutationOutcome::error(vec![e.to_string()]);
        }

        self.try_update(update)
            .await
            .unwrap_or_else(MutationOutcome::from_error)
    }

    /// Deletes an order item
    async fn delete_order_item(&self, order_item_id: &str) -> MutationOutcome {
        match self.repository.delete(order_item_id).await {
            Ok(0) => MutationOutcome::not_found(vec![
                "Order Item cannot be deleted because it does not exist.".to_string(),
            ]),
            Ok(_) => {
                debug!("Deleted order item {}", order_item_id);
                MutationOutcome::deleted()
            }
            Err(e) => {
                error!("Failed to delete order item {}: {}", order_item_id, e);
                MutationOutcome::error(vec![
                    "Error encountered while deleting order item".to_string(),
                    e.to_string(),
                ])
            }
        }
    }
}
