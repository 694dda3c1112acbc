//! Ingredient Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ingredient entity (食材)
///
/// `stock` is only ever mutated through the inventory ledger's deduct /
/// restore operations; callers never decrement it directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    /// Current stock, non-negative
    pub stock: Decimal,
    /// Unit of measure ("g", "ml", "unit", ...)
    pub unit: String,
    /// CAS version, bumped on every stock write
    pub version: u64,
}

impl Ingredient {
    pub fn new(id: i64, name: impl Into<String>, stock: Decimal, unit: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            stock,
            unit: unit.into(),
            version: 0,
        }
    }
}
