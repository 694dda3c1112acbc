//! Dining Table Model

use crate::error::InvalidTransition;
use serde::{Deserialize, Serialize};

/// Table status (桌台状态)
///
/// 订单只能在 Free 的桌台上创建；创建成功后桌台变为 Occupied，
/// 订单支付或取消后回到 Free。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[default]
    Free,
    Occupied,
    Reserved,
    Maintenance,
}

impl TableStatus {
    /// Legal status graph
    ///
    /// Reserved tables may be seated directly; Maintenance only ever
    /// returns to Free.
    pub fn can_transition(self, to: TableStatus) -> bool {
        use TableStatus::*;
        matches!(
            (self, to),
            (Free, Occupied)
                | (Free, Reserved)
                | (Free, Maintenance)
                | (Occupied, Free)
                | (Reserved, Free)
                | (Reserved, Occupied)
                | (Maintenance, Free)
        )
    }
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Free => "FREE",
            Self::Occupied => "OCCUPIED",
            Self::Reserved => "RESERVED",
            Self::Maintenance => "MAINTENANCE",
        };
        write!(f, "{s}")
    }
}

/// Dining table entity (桌台)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: i64,
    pub name: String,
    pub capacity: i32,
    pub status: TableStatus,
    /// CAS version, bumped on every status write
    pub version: u64,
}

impl DiningTable {
    pub fn new(id: i64, name: impl Into<String>, capacity: i32) -> Self {
        Self {
            id,
            name: name.into(),
            capacity,
            status: TableStatus::Free,
            version: 0,
        }
    }

    /// Transition to a new status, rejecting illegal moves
    pub fn transition(&mut self, to: TableStatus) -> Result<(), InvalidTransition> {
        if !self.status.can_transition(to) {
            return Err(InvalidTransition::new("table", self.status, to));
        }
        self.status = to;
        self.version += 1;
        Ok(())
    }
}
