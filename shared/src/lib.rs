//! Shared types for the fulfillment engine
//!
//! Domain models, state machines, and the unified error taxonomy used by
//! the fulfillment server and by embedding applications.

pub mod error;
pub mod models;
pub mod order;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ErrorCode, InvalidTransition};
pub use models::{DiningTable, Ingredient, MenuItem, PrinterConfig, TableStatus};
pub use order::{Order, OrderLine, OrderStatus, StationTicket, StationTicketItem, TicketStatus};
