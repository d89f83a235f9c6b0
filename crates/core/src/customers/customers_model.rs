use serde::{Deserialize, Serialize};

/// A storefront customer as seen by the catalog side.
///
/// Customers are managed by the identity system; this crate only ever
/// reads them, so the model is a plain value object with no insert or
/// update companions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
}
