use super::customers_model::Customer;
use crate::errors::Result;
use crate::identity::Caller;

/// Read-only lookup over the customer roster.
pub trait CustomerDirectoryTrait: Send + Sync {
    /// Retrieves a customer by ID.
    fn get_by_id(&self, customer_id: &str) -> Result<Option<Customer>>;

    /// Checks whether a customer with this ID exists.
    fn exists(&self, customer_id: &str) -> Result<bool>;

    /// Lists all customers ordered by ID ascending.
    fn list(&self) -> Result<Vec<Customer>>;
}

/// Trait defining the contract for customer read operations.
pub trait CustomerServiceTrait: Send + Sync {
    /// Lists every customer. Admin surface; gated upstream.
    fn list_customers(&self) -> Result<Vec<Customer>>;

    /// Retrieves one customer, or None when it does not exist.
    fn get_customer(&self, customer_id: &str) -> Result<Option<Customer>>;

    /// The caller's own roster entry, when one exists.
    fn get_profile(&self, caller: &Caller) -> Result<Option<Customer>>;
}
