//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One recipe line: ingredient consumed per unit produced (配方行)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeLine {
    pub ingredient_id: i64,
    /// Quantity of the ingredient consumed per unit of the menu item
    pub quantity_per_unit: Decimal,
}

/// Assignment of a menu item to a preparation station (制作区域)
///
/// Many-to-many: an item may prepare in more than one station, in which
/// case it appears on more than one ticket at full quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StationAssignment {
    /// Station key, lower-case ("kitchen", "bar", "dessert", ...)
    pub station_id: String,
    /// Estimated preparation time in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_minutes: Option<i32>,
}

/// Menu item entity (菜品)
///
/// Price and recipe are copied at order time; the order never looks them
/// up live afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    /// Unit price
    pub price: Decimal,
    pub is_active: bool,
    /// Bill of materials; empty means no ingredient tracking for this item
    #[serde(default)]
    pub recipe: Vec<RecipeLine>,
    /// Station assignments; empty means the item is billed but never routed
    #[serde(default)]
    pub stations: Vec<StationAssignment>,
}

impl MenuItem {
    pub fn new(id: i64, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            is_active: true,
            recipe: Vec::new(),
            stations: Vec::new(),
        }
    }

    pub fn with_recipe(mut self, recipe: Vec<RecipeLine>) -> Self {
        self.recipe = recipe;
        self
    }

    pub fn with_stations(mut self, stations: Vec<StationAssignment>) -> Self {
        self.stations = stations;
        self
    }
}
