//! Catalog collaborators
//!
//! The engine consumes tables, menu items, and printer configurations as
//! simple synchronous lookups. The traits are the seam; the in-memory
//! implementations back the tests and small
//! single-node deployments. A surrounding application may substitute its
//! own store behind the same traits.
//!
//! 桌台状态写入走 compare-and-set：两个并发建单不可能同时占用同一张桌台。

use dashmap::DashMap;
use shared::models::{DiningTable, MenuItem, PrinterConfig, TableStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableStoreError {
    #[error("Table not found: {0}")]
    NotFound(i64),

    #[error("Table {id} is {actual}, expected {expected}")]
    StatusConflict {
        id: i64,
        expected: TableStatus,
        actual: TableStatus,
    },
}

/// Table lookup / guarded status update
pub trait TableStore: Send + Sync {
    fn get(&self, table_id: i64) -> Option<DiningTable>;

    /// Transition `table_id` from `from` to `to` atomically.
    ///
    /// Fails with [`TableStoreError::StatusConflict`] when the current
    /// status is not `from` — the caller lost the race and must not
    /// proceed.
    fn compare_and_set_status(
        &self,
        table_id: i64,
        from: TableStatus,
        to: TableStatus,
    ) -> Result<DiningTable, TableStoreError>;
}

/// Menu item lookup (price, recipe, station assignments)
pub trait MenuCatalog: Send + Sync {
    fn menu_item(&self, menu_item_id: i64) -> Option<MenuItem>;
}

/// Printer configuration lookup by role
pub trait PrinterRegistry: Send + Sync {
    /// Roles are matched upper-cased ("CASHIER", "KITCHEN", ...)
    fn config_for_role(&self, role: &str) -> Option<PrinterConfig>;
}

/// In-memory table store
#[derive(Debug, Default)]
pub struct InMemoryTableStore {
    tables: DashMap<i64, DiningTable>,
}

impl InMemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, table: DiningTable) {
        self.tables.insert(table.id, table);
    }
}

impl TableStore for InMemoryTableStore {
    fn get(&self, table_id: i64) -> Option<DiningTable> {
        self.tables.get(&table_id).map(|t| t.clone())
    }

    fn compare_and_set_status(
        &self,
        table_id: i64,
        from: TableStatus,
        to: TableStatus,
    ) -> Result<DiningTable, TableStoreError> {
        // DashMap entry 独占引用即为桌台级锁
        let mut entry = self
            .tables
            .get_mut(&table_id)
            .ok_or(TableStoreError::NotFound(table_id))?;
        if entry.status != from {
            return Err(TableStoreError::StatusConflict {
                id: table_id,
                expected: from,
                actual: entry.status,
            });
        }
        entry
            .transition(to)
            .map_err(|_| TableStoreError::StatusConflict {
                id: table_id,
                expected: from,
                actual: entry.status,
            })?;
        Ok(entry.clone())
    }
}

/// In-memory menu catalog
#[derive(Debug, Default)]
pub struct InMemoryMenuCatalog {
    items: DashMap<i64, MenuItem>,
}

impl InMemoryMenuCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, item: MenuItem) {
        self.items.insert(item.id, item);
    }
}

impl MenuCatalog for InMemoryMenuCatalog {
    fn menu_item(&self, menu_item_id: i64) -> Option<MenuItem> {
        self.items.get(&menu_item_id).map(|i| i.clone())
    }
}

/// In-memory printer registry, keyed by upper-cased role
///
/// Role uniqueness is by construction: registering a role replaces any
/// previous configuration for it.
#[derive(Debug, Default)]
pub struct InMemoryPrinterRegistry {
    configs: DashMap<String, PrinterConfig>,
}

impl InMemoryPrinterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, mut config: PrinterConfig) {
        config.role = config.role.to_uppercase();
        self.configs.insert(config.role.clone(), config);
    }
}

impl PrinterRegistry for InMemoryPrinterRegistry {
    fn config_for_role(&self, role: &str) -> Option<PrinterConfig> {
        self.configs.get(&role.to_uppercase()).map(|c| c.clone())
    }
}
