//! The fetched snapshot document: date → time → brand → items.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Brand key → ordered listing rows captured at one (date, time) pair.
pub type Payload = BTreeMap<String, Vec<Item>>;

/// Time-of-day label (e.g. `"10:00 AM"`) → payload for a single date.
pub type DaySnapshots = BTreeMap<String, Payload>;

/// ISO date key (e.g. `"2024-01-01"`) → the snapshots captured that day.
///
/// Replaced wholesale on every committed fetch.
pub type Document = BTreeMap<String, DaySnapshots>;

/// A single listing row. Items have no identity beyond structural equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Model name, e.g. `"iPhone 15"`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub model: String,
    /// Memory/storage variant, e.g. `"8GB/256GB"`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ram_storage: String,
    /// Color variant.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub color: String,
    /// Shelf price, if listed.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Online price, if listed.
    #[serde(default)]
    pub online_price: Option<Decimal>,
    /// Stock status text, e.g. `"In Stock"`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub stock: String,
    /// Fields the board does not display but which still belong to the
    /// document content.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

// A null display field renders as an empty cell rather than failing the document
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Item {
    /// Build an item with the displayed fields and no extra content.
    pub fn new(
        model: impl Into<String>,
        ram_storage: impl Into<String>,
        color: impl Into<String>,
        price: Option<Decimal>,
        online_price: Option<Decimal>,
        stock: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            ram_storage: ram_storage.into(),
            color: color.into(),
            price,
            online_price,
            stock: stock.into(),
            extra: BTreeMap::new(),
        }
    }
}
