//! Order aggregate and station ticket types
//!
//! - **status**: tagged-variant state machines with explicit transition
//!   functions (no raw setters)
//! - **order**: the order aggregate, owning its lines by value
//! - **ticket**: per-station sub-tickets, owning their items by value
//!
//! Order and tickets are created together as one unit at order-placement
//! time and are never deleted, only transitioned to terminal states.

pub mod order;
pub mod status;
pub mod ticket;

pub use order::{Order, OrderLine, StockDeduction};
pub use status::{OrderStatus, TicketStatus};
pub use ticket::{StationTicket, StationTicketItem};
