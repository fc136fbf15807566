//! User-facing notices for rejected cart operations.
//!
//! Callers get a typed [`CartError`](crate::CartError) back from every
//! operation. The notifier is an additional side channel for surfaces that
//! show toasts or status lines.

use crate::error::CartError;

/// The public cart operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl CartOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            CartOperation::Add => "add",
            CartOperation::Remove => "remove",
            CartOperation::UpdateAmount => "update_amount",
        }
    }
}

impl core::fmt::Display for CartOperation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message shown to the user when an operation is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    StockExceeded,
    AddFailed,
    RemoveFailed,
    UpdateFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::StockExceeded => "requested quantity exceeds stock",
            Notice::AddFailed => "product addition failed",
            Notice::RemoveFailed => "product removal failed",
            Notice::UpdateFailed => "quantity update failed",
        }
    }
}

impl core::fmt::Display for Notice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

/// Receives a notice for every rejected operation.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice, cause: &CartError);
}

/// Default notifier: logs notices through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice, cause: &CartError) {
        tracing::warn!(notice = %notice, cause = %cause, "cart notice");
    }
}
