use crate::inventory::ledger::LedgerError;
use crate::stations::board::BoardError;
use shared::error::InvalidTransition;
use shared::models::TableStatus;
use thiserror::Error;

/// Manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Table not found: {0}")]
    TableNotFound(i64),

    #[error("Table {id} is not free (current: {status})")]
    TableNotAvailable { id: i64, status: TableStatus },

    #[error("Order not found: {0}")]
    OrderNotFound(i64),

    #[error("Menu item not found: {0}")]
    ItemNotFound(i64),

    #[error("Menu item {name} (id {id}) is inactive")]
    ItemInactive { id: i64, name: String },

    #[error("Invalid quantity {quantity} for menu item {menu_item_id}")]
    InvalidQuantity { menu_item_id: i64, quantity: i32 },

    #[error("Parent line index {0} does not refer to an earlier line")]
    InvalidParentLine(usize),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Transition(#[from] InvalidTransition),

    #[error(transparent)]
    Board(#[from] BoardError),
}

pub type ManagerResult<T> = Result<T, ManagerError>;
