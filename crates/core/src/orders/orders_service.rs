use std::sync::Arc;

use super::orders_model::{Order, OrderSummary};
use super::orders_traits::{OrderRepositoryTrait, OrderServiceTrait};
use crate::errors::Result;
use crate::identity::Caller;

/// Service for reading orders under ownership scoping
pub struct OrderService {
    repository: Arc<dyn OrderRepositoryTrait>,
}

impl OrderService {
    pub fn new(repository: Arc<dyn OrderRepositoryTrait>) -> Self {
        Self { repository }
    }
}

impl OrderServiceTrait for OrderService {
    fn get_order(&self, caller: &Caller, order_id: &str) -> Result<Option<Order>> {
        let order = match self.repository.get_by_id(order_id)? {
            Some(order) => order,
            None => return Ok(None),
        };

        // A foreign order must read exactly like a missing one.
        if caller.may_access(&order.customer_id) {
            Ok(Some(order))
        } else {
            Ok(None)
        }
    }

    fn list_orders(&self) -> Result<Vec<OrderSummary>> {
        self.repository.list_summaries(None)
    }

    fn list_orders_for_customer(&self, customer_id: &str) -> Result<Vec<OrderSummary>> {
        self.repository.list_summaries(Some(customer_id))
    }

    fn list_my_orders(&self, caller: &Caller) -> Result<Vec<OrderSummary>> {
        self.repository.list_summaries(Some(caller.id()))
    }
}
