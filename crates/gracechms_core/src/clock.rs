//! Time source seam.
//!
//! Views and the store ask a [`Clock`] for "now" so calendar-sensitive
//! projections can be evaluated against a fixed moment in tests.

use chrono::{DateTime, FixedOffset, Local};
use std::sync::Arc;

pub trait Clock {
    /// Current moment in the viewer's local offset.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Shared handle passed to the store and application controller.
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

/// Wall clock in the host's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Clock pinned to one moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
