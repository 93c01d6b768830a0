//! Advisory user notices
//!
//! The engine never renders anything itself; it hands the view a [`Notice`]
//! to show as an auto-expiring banner. Expiry enforcement is the view's job.

use std::time::{Duration, Instant};

/// Default lifetime of a banner before it disappears on its own.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(3);

/// Visual severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A short, auto-expiring message for the shopper.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
    pub ttl: Duration,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self::with_severity(message, Severity::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_severity(message, Severity::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_severity(message, Severity::Error)
    }

    fn with_severity(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            ttl: DEFAULT_NOTICE_TTL,
        }
    }

    /// Warning shown when a quantity change lands exactly on the stock
    /// ceiling.
    pub fn low_stock(name: &str, stock: u32) -> Self {
        Self::warning(format!("Only {stock} units of {name} left!"))
    }

    /// When a notice first shown at `shown_at` should be dismissed.
    pub fn expires_at(&self, shown_at: Instant) -> Instant {
        shown_at + self.ttl
    }
}
