//! Sequential id generation
//!
//! The engine keys orders, lines, tickets, and ticket items with
//! foreign-key-style integer ids. A single process-wide counter keeps
//! them unique across entity kinds.

use std::sync::atomic::{AtomicI64, Ordering};

/// Monotonic id generator
#[derive(Debug)]
pub struct IdGen {
    next: AtomicI64,
}

impl IdGen {
    pub fn new() -> Self {
        Self {
            next: AtomicI64::new(1),
        }
    }

    /// Start from a given id (for embedding apps restoring persisted state)
    pub fn starting_at(first: i64) -> Self {
        Self {
            next: AtomicI64::new(first),
        }
    }

    pub fn next(&self) -> i64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGen {
    fn default() -> Self {
        Self::new()
    }
}
