use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// Format for order dates flattened into listing rows.
pub const ORDER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Tax jurisdiction recorded on an order at checkout time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Province {
    On,
    Qc,
    Ns,
    Nb,
    Mb,
    Bc,
    Pe,
    Sk,
    Ab,
    Nl,
}

impl Province {
    /// Two-letter postal code for the jurisdiction.
    pub fn code(&self) -> &'static str {
        match self {
            Province::On => "ON",
            Province::Qc => "QC",
            Province::Ns => "NS",
            Province::Nb => "NB",
            Province::Mb => "MB",
            Province::Bc => "BC",
            Province::Pe => "PE",
            Province::Sk => "SK",
            Province::Ab => "AB",
            Province::Nl => "NL",
        }
    }
}

impl FromStr for Province {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ON" => Ok(Province::On),
            "QC" => Ok(Province::Qc),
            "NS" => Ok(Province::Ns),
            "NB" => Ok(Province::Nb),
            "MB" => Ok(Province::Mb),
            "BC" => Ok(Province::Bc),
            "PE" => Ok(Province::Pe),
            "SK" => Ok(Province::Sk),
            "AB" => Ok(Province::Ab),
            "NL" => Ok(Province::Nl),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown province code: {}",
                other
            )))),
        }
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// An order captured by the checkout flow.
///
/// Orders are append-mostly in this layer: checkout creates them, and the
/// services here only read them back under ownership scoping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_date: NaiveDateTime,
    pub province: Province,
    pub total: Decimal,
    pub tax: Decimal,
    pub tax_description: String,
    pub customer_id: String,
}

/// Flattened listing row joining an order to its owner and item count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: String,
    /// Order date rendered with [`ORDER_DATE_FORMAT`].
    pub order_date: String,
    pub customer_id: String,
    pub customer_name: String,
    pub item_count: i64,
}
