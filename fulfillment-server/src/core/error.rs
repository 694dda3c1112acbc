//! Unified engine error
//!
//! Module-level errors (ledger, manager, board, dispatcher) are converted
//! into this taxonomy at the composition boundary. The embedding
//! application maps [`shared::ErrorCode`] onto its transport (404 for
//! NotFound, 409 for InvalidState / InsufficientStock, ...).

use crate::inventory::ledger::LedgerError;
use crate::orders::manager::ManagerError;
use crate::printing::dispatcher::DispatchError;
use crate::stations::board::BoardError;
use shared::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("验证错误: {0}")]
    Validation(String),

    #[error("状态冲突: {0}")]
    InvalidState(String),

    #[error("库存不足: {message}")]
    InsufficientStock { ingredient_id: i64, message: String },

    #[error("打印机未配置: {0}")]
    PrinterNotConfigured(String),

    #[error("打印派发失败: {0}")]
    DispatchFailed(String),

    #[error("内部错误")]
    Internal(#[from] anyhow::Error),
}

impl EngineError {
    /// Classify into the shared error code taxonomy
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Validation(_) => ErrorCode::Validation,
            Self::InvalidState(_) => ErrorCode::InvalidState,
            Self::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            Self::PrinterNotConfigured(_) => ErrorCode::PrinterNotConfigured,
            Self::DispatchFailed(_) => ErrorCode::DispatchFailed,
            Self::Internal(err) => {
                // 记录内部错误但不暴露详细信息
                tracing::error!(error = ?err, "Internal engine error");
                ErrorCode::Internal
            }
        }
    }
}

impl From<ManagerError> for EngineError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::TableNotFound(id) => Self::NotFound(format!("table {id}")),
            ManagerError::OrderNotFound(id) => Self::NotFound(format!("order {id}")),
            ManagerError::ItemNotFound(id) => Self::NotFound(format!("menu item {id}")),
            ManagerError::ItemInactive { .. }
            | ManagerError::InvalidQuantity { .. }
            | ManagerError::InvalidParentLine(_) => Self::Validation(err.to_string()),
            ManagerError::TableNotAvailable { .. } => Self::InvalidState(err.to_string()),
            ManagerError::Transition(e) => Self::InvalidState(e.to_string()),
            ManagerError::Ledger(e) => e.into(),
            ManagerError::Board(e) => e.into(),
        }
    }
}

impl From<LedgerError> for EngineError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientStock { ingredient_id, .. } => Self::InsufficientStock {
                ingredient_id,
                message: err.to_string(),
            },
            // 配方引用了不存在的食材，属于目录数据损坏
            LedgerError::IngredientNotFound(_) => Self::Internal(anyhow::anyhow!(err)),
        }
    }
}

impl From<BoardError> for EngineError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::TicketNotFound(id) => Self::NotFound(format!("station ticket {id}")),
            BoardError::ItemNotFound { .. } => Self::NotFound(err.to_string()),
            BoardError::Transition(e) => Self::InvalidState(e.to_string()),
        }
    }
}

impl From<DispatchError> for EngineError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::PrinterNotConfigured(role) => Self::PrinterNotConfigured(role),
            DispatchError::ChannelClosed(msg) => Self::DispatchFailed(msg),
        }
    }
}

/// 引擎操作的 Result 类型别名
pub type EngineResult<T> = std::result::Result<T, EngineError>;
