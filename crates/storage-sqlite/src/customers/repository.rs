use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::{IntoCore, Result};
use crate::schema::users;

use super::model::UserDB;
use storefront_core::customers::{Customer, CustomerDirectoryTrait};

/// Only rows carrying this role belong to the storefront roster. Staff
/// accounts live in the same table but are never listed as customers.
const CUSTOMER_ROLE: &str = "customer";

/// Read-only directory over the users table.
pub struct CustomerDirectory {
    pool: Arc<DbPool>,
}

impl CustomerDirectory {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl CustomerDirectoryTrait for CustomerDirectory {
    fn get_by_id(&self, customer_id: &str) -> Result<Option<Customer>> {
        let mut conn = get_connection(&self.pool)?;

        let row = users::table
            .find(customer_id)
            .filter(users::role.eq(CUSTOMER_ROLE))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(row.map(Customer::from))
    }

    fn exists(&self, customer_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;

        let count: i64 = users::table
            .filter(users::id.eq(customer_id))
            .filter(users::role.eq(CUSTOMER_ROLE))
            .count()
            .get_result(&mut conn)
            .into_core()?;

        Ok(count > 0)
    }

    fn list(&self) -> Result<Vec<Customer>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = users::table
            .filter(users::role.eq(CUSTOMER_ROLE))
            .select(UserDB::as_select())
            .order(users::id.asc())
            .load::<UserDB>(&mut conn)
            .into_core()?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }
}
