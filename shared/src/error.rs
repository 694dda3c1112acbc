//! Error types for the shared crate
//!
//! Standardized error codes used across the engine. The server crate wraps
//! these into its own error enum; embedding applications map them onto
//! whatever transport they expose.

use thiserror::Error;

/// Standard engine error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Success
    Success,
    /// Validation error (bad input)
    Validation,
    /// Resource not found (table / menu item / printer config)
    NotFound,
    /// Illegal state transition or busy resource
    InvalidState,
    /// Not enough ingredient stock for the requested quantity
    InsufficientStock,
    /// No printer configuration for the requested role
    PrinterNotConfigured,
    /// Print job could not be published to the bridge channel
    DispatchFailed,
    /// Internal engine error
    Internal,
}

impl ErrorCode {
    /// Get the default message for this error
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Validation => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::InvalidState => "Invalid state",
            Self::InsufficientStock => "Insufficient ingredient stock",
            Self::PrinterNotConfigured => "Printer not configured",
            Self::DispatchFailed => "Print dispatch failed",
            Self::Internal => "Internal error",
        }
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Success => "E0000",
            Self::Validation => "E0002",
            Self::NotFound => "E0003",
            Self::InvalidState => "E0004",
            Self::InsufficientStock => "E1001",
            Self::PrinterNotConfigured => "E1002",
            Self::DispatchFailed => "E1003",
            Self::Internal => "E9001",
        }
    }

    /// 是否属于客户端可重试之外的冲突类错误
    ///
    /// InvalidState 和 InsufficientStock 对应 HTTP 409 语义，
    /// 由调用方原样上报，不做重试。
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::InvalidState | Self::InsufficientStock)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Rejected state transition
///
/// Produced by the explicit transition functions on order / ticket / table
/// state enums. There are no raw status setters; every state change goes
/// through a function that may return this error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal transition: {entity} {from} -> {to}")]
pub struct InvalidTransition {
    /// Entity kind ("order", "ticket", "ticket_item", "table")
    pub entity: &'static str,
    pub from: String,
    pub to: String,
}

impl InvalidTransition {
    pub fn new(entity: &'static str, from: impl ToString, to: impl ToString) -> Self {
        Self {
            entity,
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}
