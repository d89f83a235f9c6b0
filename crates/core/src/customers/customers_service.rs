use std::sync::Arc;

use super::customers_model::Customer;
use super::customers_traits::{CustomerDirectoryTrait, CustomerServiceTrait};
use crate::errors::Result;
use crate::identity::Caller;

/// Service exposing the read-only customer directory
pub struct CustomerService {
    directory: Arc<dyn CustomerDirectoryTrait>,
}

impl CustomerService {
    pub fn new(directory: Arc<dyn CustomerDirectoryTrait>) -> Self {
        Self { directory }
    }
}

impl CustomerServiceTrait for CustomerService {
    fn list_customers(&self) -> Result<Vec<Customer>> {
        self.directory.list()
    }

    fn get_customer(&self, customer_id: &str) -> Result<Option<Customer>> {
        self.directory.get_by_id(customer_id)
    }

    fn get_profile(&self, caller: &Caller) -> Result<Option<Customer>> {
        self.directory.get_by_id(caller.id())
    }
}
