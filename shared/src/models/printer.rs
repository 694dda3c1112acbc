//! Printer Configuration Model

use serde::{Deserialize, Serialize};

/// Printer configuration (打印机配置)
///
/// One configuration per role. Roles are stored upper-cased and unique:
/// "CASHIER" for the till receipt, or a station id ("KITCHEN", "BAR", ...)
/// for station tickets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterConfig {
    pub id: i64,
    /// Upper-cased role key
    pub role: String,
    /// Driver type understood by the print bridge ("ESCPOS", "RAW", ...)
    pub printer_type: String,
    /// Physical target: device path, IP:port, or queue name
    pub printer_target: String,
    /// CAS version, bumped on every write
    pub version: u64,
}

impl PrinterConfig {
    pub fn new(
        id: i64,
        role: impl Into<String>,
        printer_type: impl Into<String>,
        printer_target: impl Into<String>,
    ) -> Self {
        Self {
            id,
            role: role.into().to_uppercase(),
            printer_type: printer_type.into(),
            printer_target: printer_target.into(),
            version: 0,
        }
    }
}
