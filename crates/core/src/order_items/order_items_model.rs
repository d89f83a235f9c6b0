use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// One line of an order.
///
/// The unit price is captured at purchase time and deliberately decoupled
/// from the product's current price. The subtotal is derived on demand and
/// never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub order_id: String,
    pub product_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl OrderItem {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// An order item joined with its product, order, and owning customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDetails {
    pub id: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub order_id: String,
    pub product_id: String,
    pub product_sku: String,
    /// Order date rendered with [`crate::orders::ORDER_DATE_FORMAT`].
    pub order_date: String,
    pub customer_id: String,
    pub customer_name: String,
}

impl OrderItemDetails {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Payload for creating an order item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub id: Option<String>,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub order_id: String,
    pub product_id: String,
}

impl NewOrderItem {
    /// Validates the order item payload before persisting.
    pub fn validate(&self) -> Result<()> {
        if self.quantity <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Order item quantity must be positive".to_string(),
            )));
        }
        if self.unit_price.is_sign_negative() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Order item unit price cannot be negative".to_string(),
            )));
        }
        if self.order_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Order item order ID cannot be empty".to_string(),
            )));
        }
        if self.product_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Order item product ID cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Payload for replacing an order item's fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemUpdate {
    pub id: Option<String>,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub order_id: String,
    pub product_id: String,
}

impl OrderItemUpdate {
    /// Validates the order item payload before persisting.
    pub fn validate(&self) -> Result<()> {
        if self.id.as_deref().unwrap_or("").trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Order item ID is required for updates".to_string(),
            )));
        }
        if self.quantity <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Order item quantity must be positive".to_string(),
            )));
        }
        if self.unit_price.is_sign_negative() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Order item unit price cannot be negative".to_string(),
            )));
        }
        if self.order_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Order item order ID cannot be empty".to_string(),
            )));
        }
        if self.product_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Order item product ID cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}
