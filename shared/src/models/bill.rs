//! Bill Model
//!
//! A completed bill as handed over by the POS layer for printing. All money
//! values are final amounts in the base currency unit; nothing here is
//! recomputed downstream.

use crate::error::{BillDataError, BillDataResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Restaurant identity printed in the receipt header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub name: String,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// GSTIN registration number
    pub gst_number: Option<String>,
    /// FSSAI food licence number
    pub fssai_number: Option<String>,
}

/// Dine-in marker: the front end sends either a flag or a table label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DineIn {
    Flag(bool),
    Label(String),
}

impl DineIn {
    /// `true` for a set flag or a non-empty label
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Label(label) => !label.is_empty(),
        }
    }
}

impl fmt::Display for DineIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(flag) => write!(f, "{}", flag),
            Self::Label(label) => f.write_str(label),
        }
    }
}

/// Bill metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub guest_name: Option<String>,
    pub time: String,
    pub date: String,
    pub dine_in: Option<DineIn>,
    pub cashier: Option<String>,
    pub waiter_name: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub bill_number: String,
}

/// Bill line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillItem {
    pub name: String,
    pub quantity: u32,
    /// Unit price in currency unit
    pub price: f64,
    /// Line total in currency unit (supplied, never recomputed)
    pub total: f64,
}

impl BillItem {
    pub fn new(name: impl Into<String>, quantity: u32, price: f64, total: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
            total,
        }
    }
}

/// Precomputed bill totals in currency unit
///
/// When both `cgst` and `sgst` are present the split pair is printed instead
/// of the flat `gst` amount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: f64,
    #[serde(default)]
    pub service_charge: f64,
    pub cgst: Option<f64>,
    pub sgst: Option<f64>,
    #[serde(default)]
    pub gst: f64,
    pub discount: Option<f64>,
    pub round_off: Option<f64>,
    pub grand_total: f64,
}

/// Everything needed to print one receipt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillData {
    pub restaurant: Restaurant,
    pub bill: Bill,
    #[serde(default)]
    pub items: Vec<BillItem>,
    /// Symbol prefixed to every money value (e.g. "₹")
    #[serde(default)]
    pub currency: String,
    pub totals: Totals,
    /// Service charge percentage, label only
    pub tax_rate_service: Option<f64>,
    /// Total GST percentage, label only
    pub tax_rate_gst: Option<f64>,
}

impl BillData {
    /// Parse a bill from front-end JSON and check item quantities
    pub fn from_json(json: &str) -> BillDataResult<Self> {
        let bill: Self = serde_json::from_str(json)?;
        bill.validate()?;
        Ok(bill)
    }

    /// Parse a bill from raw JSON bytes
    pub fn from_slice(bytes: &[u8]) -> BillDataResult<Self> {
        let bill: Self = serde_json::from_slice(bytes)?;
        bill.validate()?;
        Ok(bill)
    }

    /// Every item must have a quantity of at least one
    pub fn validate(&self) -> BillDataResult<()> {
        if let Some((index, item)) = self
            .items
            .iter()
            .enumerate()
            .find(|(_, item)| item.quantity == 0)
        {
            return Err(BillDataError::ZeroQuantity {
                index,
                name: item.name.clone(),
            });
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Int(i64),
    Float(f64),
}

/// Bill numbers arrive as strings or plain JSON numbers
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Int(n) => n.to_string(),
        TextOrNumber::Float(f) => f.to_string(),
    })
}
