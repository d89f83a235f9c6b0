use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use storefront_core::customers::Customer;

/// A row of the users table. The storefront only ever reads it; account
/// provisioning happens in the identity system upstream. The Insertable
/// derive stays for test seeding.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::users)]
#[serde(rename_all = "camelCase")]
pub struct UserDB {
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub role: String,
}

impl From<UserDB> for Customer {
    fn from(db: UserDB) -> Self {
        Customer {
            id: db.id,
            name: db.user_name,
            email: db.email,
        }
    }
}
