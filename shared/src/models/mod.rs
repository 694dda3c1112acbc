//! Domain models
//!
//! Long-lived catalog entities (tables, menu items, ingredients, printer
//! configurations). These are created through the surrounding system's CRUD
//! surface and consumed here via synchronous lookups.

pub mod dining_table;
pub mod ingredient;
pub mod menu_item;
pub mod printer;

pub use dining_table::{DiningTable, TableStatus};
pub use ingredient::Ingredient;
pub use menu_item::{MenuItem, RecipeLine, StationAssignment};
pub use printer::PrinterConfig;
